use serde::{Deserialize, Serialize};

use super::AnswerRecord;

/// A selectable answer for a [`QuestionKind::Choice`] question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Value stored in the answer record and submitted with the form.
    pub value: String,
    /// Text shown to the visitor.
    pub label: String,
}

impl ChoiceOption {
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Input control used by a free-text question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Number,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Choice {
        options: Vec<ChoiceOption>,
    },
    FreeText {
        input: InputKind,
        placeholder: Option<String>,
        suffix: Option<String>,
        max_length: Option<usize>,
    },
}

/// Inclusion rule for a question.
///
/// Gates are keyed on a single earlier field so that same-id branches can be
/// checked for exclusivity and completeness when the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum Gate {
    #[default]
    Always,
    When {
        field: String,
        equals: String,
    },
}

impl Gate {
    pub fn when(
        field: impl Into<String>,
        equals: impl Into<String>,
    ) -> Self {
        Self::When {
            field: field.into(),
            equals: equals.into(),
        }
    }

    /// Evaluates the gate against the in-progress answers.
    pub fn admits(
        &self,
        answers: &AnswerRecord,
    ) -> bool {
        match self {
            Self::Always => true,
            Self::When { field, equals } => answers.get(field) == Some(equals.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub gate: Gate,
}

impl Question {
    pub fn choice(
        id: impl Into<String>,
        title: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: QuestionKind::Choice { options },
            gate: Gate::Always,
        }
    }

    pub fn free_text(
        id: impl Into<String>,
        title: impl Into<String>,
        input: InputKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: QuestionKind::FreeText {
                input,
                placeholder: None,
                suffix: None,
                max_length: None,
            },
            gate: Gate::Always,
        }
    }

    pub fn gated(
        mut self,
        gate: Gate,
    ) -> Self {
        self.gate = gate;
        self
    }

    /// Sets the placeholder on a free-text question. No effect on choices.
    pub fn with_placeholder(
        mut self,
        text: impl Into<String>,
    ) -> Self {
        if let QuestionKind::FreeText { placeholder, .. } = &mut self.kind {
            *placeholder = Some(text.into());
        }
        self
    }

    /// Sets the unit suffix on a free-text question. No effect on choices.
    pub fn with_suffix(
        mut self,
        text: impl Into<String>,
    ) -> Self {
        if let QuestionKind::FreeText { suffix, .. } = &mut self.kind {
            *suffix = Some(text.into());
        }
        self
    }

    /// Caps the accepted length of a free-text answer. No effect on choices.
    pub fn with_max_length(
        mut self,
        len: usize,
    ) -> Self {
        if let QuestionKind::FreeText { max_length, .. } = &mut self.kind {
            *max_length = Some(len);
        }
        self
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            QuestionKind::Choice { options } => options,
            QuestionKind::FreeText { .. } => &[],
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::Choice { .. })
    }

    pub fn option_label(
        &self,
        value: &str,
    ) -> Option<&str> {
        self.options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn always_gate_admits_empty_record() {
        assert!(Gate::Always.admits(&AnswerRecord::new()));
    }

    #[test]
    fn when_gate_requires_matching_value() {
        let gate = Gate::when("projectCategory", "exterior");
        let mut answers = AnswerRecord::new();

        assert!(!gate.admits(&answers));

        answers.set("projectCategory", "renovation");
        assert!(!gate.admits(&answers));

        answers.set("projectCategory", "exterior");
        assert!(gate.admits(&answers));
    }

    #[test]
    fn builders_only_touch_free_text() {
        let choice = Question::choice("q", "Q?", vec![ChoiceOption::new("a", "A")])
            .with_suffix("m²")
            .with_max_length(3);
        assert_eq!(choice.options().len(), 1);
        assert!(choice.is_choice());

        let text = Question::free_text("zip", "Zip?", InputKind::Text).with_max_length(10);
        assert_eq!(
            text.kind,
            QuestionKind::FreeText {
                input: InputKind::Text,
                placeholder: None,
                suffix: None,
                max_length: Some(10),
            }
        );
        assert!(text.options().is_empty());
    }

    #[test]
    fn option_label_finds_listed_value() {
        let q = Question::choice(
            "timeline",
            "Quand ?",
            vec![ChoiceOption::new("urgent", "Urgent"), ChoiceOption::new("flexible", "Flexible")],
        );

        assert_eq!(q.option_label("flexible"), Some("Flexible"));
        assert_eq!(q.option_label("never"), None);
    }
}
