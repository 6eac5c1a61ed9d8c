use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Answers collected during one wizard session, keyed by question id.
///
/// Empty strings are stored as given but read back as absent, so lookups
/// behave the same whether a field was never asked or left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    values: BTreeMap<String, String>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&str> {
        self.values
            .get(id)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Records (or overwrites) the answer for `id`.
    pub fn set(
        &mut self,
        id: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.values.insert(id.into(), value.into());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when no field holds a non-empty value.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn blank_values_read_as_absent() {
        let mut answers = AnswerRecord::new();
        answers.set("area", "");

        assert_eq!(answers.get("area"), None);
        assert!(answers.is_empty());
    }

    #[test]
    fn set_overwrites_previous_answer() {
        let mut answers = AnswerRecord::new();
        answers.set("timeline", "urgent");
        answers.set("timeline", "flexible");

        assert_eq!(answers.get("timeline"), Some("flexible"));
        assert_eq!(answers.iter().count(), 1);
    }

    #[test]
    fn clear_empties_record() {
        let mut answers: AnswerRecord = [("area", "80"), ("zipCode", "75001")].into_iter().collect();
        assert!(!answers.is_empty());

        answers.clear();

        assert!(answers.is_empty());
        assert_eq!(answers, AnswerRecord::new());
    }
}
