//! The ordered question catalog and its branch filtering.
//!
//! Several entries may share an id when they are alternative branches keyed
//! on an earlier choice (the four `renovationType` pickers, for instance).
//! [`Catalog::new`] checks that such branches partition the discriminant's
//! options: every option selects exactly one branch.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{AnswerRecord, ChoiceOption, Gate, InputKind, Question, fields};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("question #{0} has an empty id")]
    EmptyId(usize),

    #[error("question '{0}' has an empty title")]
    EmptyTitle(String),

    #[error("choice question '{0}' has no options")]
    NoOptions(String),

    #[error("question '{id}' lists option '{value}' twice")]
    DuplicateOption { id: String, value: String },

    #[error("question '{id}' is gated on '{field}', which is not an earlier question")]
    UnknownDiscriminant { id: String, field: String },

    #[error("question '{id}' is gated on '{field}' = '{value}', which is not one of its options")]
    UnknownGateValue {
        id: String,
        field: String,
        value: String,
    },

    #[error("question '{0}' appears more than once but not every entry is gated")]
    UngatedBranch(String),

    #[error("branches of '{0}' are gated on different fields")]
    MixedDiscriminant(String),

    #[error("branches of '{id}' are keyed on '{field}', which must be an always-asked choice")]
    DiscriminantNotChoice { id: String, field: String },

    #[error("two branches of '{id}' both match '{value}'")]
    OverlappingBranches { id: String, value: String },

    #[error("no branch of '{id}' matches '{value}'")]
    IncompleteBranches { id: String, value: String },
}

/// Immutable, validated list of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Builds a catalog after checking every gate and branch group.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut first_index: HashMap<&str, usize> = HashMap::new();

        for (index, question) in questions.iter().enumerate() {
            if question.id.is_empty() {
                return Err(CatalogError::EmptyId(index));
            }
            if question.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(question.id.clone()));
            }
            if question.is_choice() {
                check_options(question)?;
            }
            if let Gate::When { field, equals } = &question.gate {
                let discriminant = first_index
                    .get(field.as_str())
                    .map(|&i| &questions[i])
                    .ok_or_else(|| CatalogError::UnknownDiscriminant {
                        id: question.id.clone(),
                        field: field.clone(),
                    })?;
                if discriminant.is_choice() && discriminant.option_label(equals).is_none() {
                    return Err(CatalogError::UnknownGateValue {
                        id: question.id.clone(),
                        field: field.clone(),
                        value: equals.clone(),
                    });
                }
            }
            first_index.entry(question.id.as_str()).or_insert(index);
        }

        let catalog = Self { questions };
        catalog.check_branches()?;
        Ok(catalog)
    }

    /// The catalog used by the quote site.
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions whose gate admits `answers`, in catalog order.
    pub fn applicable(
        &self,
        answers: &AnswerRecord,
    ) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.gate.admits(answers))
            .collect()
    }

    /// Distinct question ids in catalog order.
    pub fn field_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.questions
            .iter()
            .map(|q| q.id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Display label for a stored answer.
    ///
    /// Looks in the branch that applies to `answers` first, then in any entry
    /// with that id, and falls back to the raw value.
    pub fn option_label<'a>(
        &'a self,
        id: &str,
        value: &'a str,
        answers: &AnswerRecord,
    ) -> &'a str {
        let same_id = || self.questions.iter().filter(move |q| q.id == id);

        same_id()
            .filter(|q| q.gate.admits(answers))
            .find_map(|q| q.option_label(value))
            .or_else(|| same_id().find_map(|q| q.option_label(value)))
            .unwrap_or(value)
    }

    fn check_branches(&self) -> Result<(), CatalogError> {
        let mut groups: Vec<(&str, Vec<&Question>)> = Vec::new();
        for question in &self.questions {
            match groups.iter_mut().find(|(id, _)| *id == question.id) {
                Some((_, members)) => members.push(question),
                None => groups.push((question.id.as_str(), vec![question])),
            }
        }

        for (id, members) in groups.into_iter().filter(|(_, m)| m.len() > 1) {
            let mut discriminant_field: Option<&str> = None;
            let mut covered: HashSet<&str> = HashSet::new();

            for member in &members {
                let Gate::When { field, equals } = &member.gate else {
                    return Err(CatalogError::UngatedBranch(id.to_string()));
                };
                match discriminant_field {
                    Some(existing) if existing != field => {
                        return Err(CatalogError::MixedDiscriminant(id.to_string()));
                    }
                    _ => discriminant_field = Some(field.as_str()),
                }
                if !covered.insert(equals.as_str()) {
                    return Err(CatalogError::OverlappingBranches {
                        id: id.to_string(),
                        value: equals.clone(),
                    });
                }
            }

            let Some(field) = discriminant_field else {
                continue;
            };
            let discriminant = self
                .questions
                .iter()
                .find(|q| q.id == field)
                .filter(|q| q.is_choice() && q.gate == Gate::Always)
                .ok_or_else(|| CatalogError::DiscriminantNotChoice {
                    id: id.to_string(),
                    field: field.to_string(),
                })?;

            if let Some(missing) = discriminant
                .options()
                .iter()
                .find(|o| !covered.contains(o.value.as_str()))
            {
                return Err(CatalogError::IncompleteBranches {
                    id: id.to_string(),
                    value: missing.value.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_options(question: &Question) -> Result<(), CatalogError> {
    let options = question.options();
    if options.is_empty() {
        return Err(CatalogError::NoOptions(question.id.clone()));
    }
    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.value.as_str()) {
            return Err(CatalogError::DuplicateOption {
                id: question.id.clone(),
                value: option.value.clone(),
            });
        }
    }
    Ok(())
}

fn options(pairs: &[(&str, &str)]) -> Vec<ChoiceOption> {
    pairs
        .iter()
        .map(|(value, label)| ChoiceOption::new(*value, *label))
        .collect()
}

fn standard_questions() -> Vec<Question> {
    vec![
        Question::choice(
            fields::PROJECT_CATEGORY,
            "Quel type de projet ?",
            options(&[
                ("renovation", "Rénovation"),
                ("extension", "Extension"),
                ("specific-room", "Pièce spécifique"),
                ("exterior", "Travaux extérieurs"),
            ]),
        ),
        Question::choice(
            fields::PROPERTY_TYPE,
            "Type de bien ?",
            options(&[("house", "Maison"), ("flat", "Appartement"), ("office", "Bureau")]),
        ),
        Question::choice(
            fields::PROPERTY_AGE,
            "Âge de la propriété ?",
            options(&[
                ("new", "Moins de 5 ans"),
                ("0-10", "5-10 ans"),
                ("10-30", "10-30 ans"),
                ("30-50", "30-50 ans"),
                ("50+", "Plus de 50 ans"),
            ]),
        ),
        Question::choice(
            fields::RENOVATION_TYPE,
            "Type de rénovation ?",
            options(&[
                ("complete", "Complète"),
                ("partial", "Partielle"),
                ("insulation", "Isolation & Énergie"),
                ("electrical", "Électrique"),
                ("plumbing", "Plomberie"),
                ("painting", "Peinture"),
            ]),
        )
        .gated(Gate::when(fields::PROJECT_CATEGORY, "renovation")),
        Question::choice(
            fields::RENOVATION_TYPE,
            "Quelle pièce ?",
            options(&[
                ("kitchen", "Cuisine"),
                ("bathroom", "Salle de bain"),
                ("bedroom", "Chambre"),
                ("livingroom", "Salon"),
            ]),
        )
        .gated(Gate::when(fields::PROJECT_CATEGORY, "specific-room")),
        Question::choice(
            fields::RENOVATION_TYPE,
            "Travaux extérieurs ?",
            options(&[("facade", "Façade"), ("roofing", "Toiture")]),
        )
        .gated(Gate::when(fields::PROJECT_CATEGORY, "exterior")),
        Question::choice(
            fields::RENOVATION_TYPE,
            "Type d'extension ?",
            options(&[("extension", "Extension maison")]),
        )
        .gated(Gate::when(fields::PROJECT_CATEGORY, "extension")),
        Question::free_text(fields::AREA, "Superficie concernée ?", InputKind::Number)
            .with_placeholder("en m²")
            .with_suffix("m²"),
        Question::choice(
            fields::CURRENT_CONDITION,
            "État actuel ?",
            options(&[
                ("excellent", "Excellent"),
                ("good", "Bon"),
                ("average", "Moyen"),
                ("poor", "Mauvais"),
                ("very-poor", "Très mauvais"),
            ]),
        ),
        Question::choice(
            fields::DESIRED_FINISH,
            "Niveau de finition souhaité ?",
            options(&[
                ("basic", "Entrée de gamme"),
                ("standard", "Standard"),
                ("premium", "Haut de gamme"),
                ("luxury", "Luxe"),
            ]),
        ),
        Question::choice(
            fields::TIMELINE,
            "Quand commencer ?",
            options(&[
                ("urgent", "Urgent"),
                ("1-3 mois", "1-3 mois"),
                ("3-6 mois", "3-6 mois"),
                ("flexible", "Flexible"),
            ]),
        ),
        Question::free_text(fields::ZIP_CODE, "Code postal ?", InputKind::Text)
            .with_placeholder("Ex: 75001")
            .with_max_length(10),
    ]
}
