use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Screen, progress_percent};
use crate::calculations::{PricingEngine, PricingTable};
use crate::catalog::Catalog;
use crate::models::{
    AnswerRecord, ContactDetails, Estimate, InputKind, Question, QuestionKind, ValidationError, fields,
};
use crate::submission::{FormTransport, Submission, TransportError};

/// Form name used when none is configured.
pub const DEFAULT_FORM_NAME: &str = "renovation-quote";

/// Rows of the recap shown with the estimate, in display order.
const SUMMARY_FIELDS: [(&str, &str); 8] = [
    (fields::PROJECT_CATEGORY, "Projet"),
    (fields::PROPERTY_TYPE, "Bien"),
    (fields::PROPERTY_AGE, "Âge"),
    (fields::RENOVATION_TYPE, "Travaux"),
    (fields::AREA, "Surface"),
    (fields::CURRENT_CONDITION, "État"),
    (fields::DESIRED_FINISH, "Finition"),
    (fields::TIMELINE, "Délai"),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("cannot {action} from the {screen} screen")]
    InvalidTransition { action: &'static str, screen: Screen },

    #[error("'{value}' is not an option of '{id}'")]
    UnknownOption { id: String, value: String },

    #[error("an answer to '{0}' is required")]
    EmptyAnswer(String),

    #[error("answer to '{id}' exceeds {max} characters")]
    TooLong { id: String, max: usize },

    #[error("'{value}' is not a valid number for '{id}'")]
    NotANumber { id: String, value: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submission is only possible from the contact form (currently on {0})")]
    InvalidState(Screen),

    #[error("a submission is already in progress")]
    InFlight,

    #[error("no submission is in progress")]
    NotInFlight,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// One line of the answer recap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

/// State of one visitor's pass through the wizard.
///
/// The session is the only owner of the answer record and contact details;
/// [`WizardSession::restart`] returns it to a freshly created state.
#[derive(Debug, Clone)]
pub struct WizardSession {
    catalog: Arc<Catalog>,
    pricing: Arc<PricingTable>,
    form_name: String,
    answers: AnswerRecord,
    contact: ContactDetails,
    screen: Screen,
    submitting: bool,
    last_error: Option<SubmitError>,
}

impl WizardSession {
    pub fn new(
        catalog: Arc<Catalog>,
        pricing: Arc<PricingTable>,
    ) -> Self {
        Self {
            catalog,
            pricing,
            form_name: DEFAULT_FORM_NAME.to_string(),
            answers: AnswerRecord::new(),
            contact: ContactDetails::default(),
            screen: Screen::Landing,
            submitting: false,
            last_error: None,
        }
    }

    pub fn with_form_name(
        mut self,
        form_name: impl Into<String>,
    ) -> Self {
        self.form_name = form_name.into();
        self
    }

    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactDetails {
        &mut self.contact
    }

    pub fn set_contact(
        &mut self,
        contact: ContactDetails,
    ) {
        self.contact = contact;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Error from the most recent failed submission, cleared on the next
    /// attempt.
    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    /// Questions that apply to the current answers.
    pub fn applicable_questions(&self) -> Vec<&Question> {
        self.catalog.applicable(&self.answers)
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.screen {
            Screen::Question(i) => self.applicable_questions().get(i).copied(),
            _ => None,
        }
    }

    /// `(step, total)` while a question is shown, counting from 1.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self.screen {
            Screen::Question(i) => Some((i + 1, self.applicable_questions().len())),
            _ => None,
        }
    }

    pub fn progress(&self) -> f64 {
        progress_percent(self.screen, self.applicable_questions().len())
    }

    pub fn estimate(&self) -> Estimate {
        PricingEngine::new(&self.pricing).estimate(&self.answers)
    }

    /// Leaves the landing screen for the first applicable question.
    pub fn start(&mut self) -> Result<(), WizardError> {
        if self.screen != Screen::Landing {
            return Err(self.invalid("start"));
        }
        self.screen = if self.applicable_questions().is_empty() {
            Screen::ContactForm
        } else {
            Screen::Question(0)
        };
        debug!(screen = %self.screen, "wizard started");
        Ok(())
    }

    /// Records `value` for the current question and advances.
    ///
    /// The applicable list is recomputed after recording, so answering a
    /// category question brings its branch into the sequence.
    pub fn answer(
        &mut self,
        value: &str,
    ) -> Result<(), WizardError> {
        let Screen::Question(index) = self.screen else {
            return Err(self.invalid("answer"));
        };
        let Some(question) = self.current_question() else {
            return Err(self.invalid("answer"));
        };
        let id = question.id.clone();
        let value = Self::check_answer(question, value)?;

        self.answers.set(id.as_str(), value);

        let total = self.applicable_questions().len();
        self.screen = if index + 1 < total {
            Screen::Question(index + 1)
        } else {
            Screen::ContactForm
        };
        debug!(%id, screen = %self.screen, total, "answer recorded");
        Ok(())
    }

    /// Steps back one screen. Returns `false` when there is nowhere to go
    /// (first question, landing, success, or while submitting).
    pub fn back(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        let previous = match self.screen {
            Screen::Question(i) if i > 0 => Screen::Question(i - 1),
            Screen::ContactForm => match self.applicable_questions().len() {
                0 => return false,
                n => Screen::Question(n - 1),
            },
            _ => return false,
        };
        debug!(from = %self.screen, to = %previous, "back");
        self.screen = previous;
        true
    }

    /// Discards every answer and contact detail and returns to the landing
    /// screen.
    pub fn restart(&mut self) {
        self.answers.clear();
        self.contact = ContactDetails::default();
        self.submitting = false;
        self.last_error = None;
        self.screen = Screen::Landing;
        debug!("wizard restarted");
    }

    /// Recap rows for the answered fields, with option labels.
    pub fn summary(&self) -> Vec<SummaryRow> {
        SUMMARY_FIELDS
            .iter()
            .filter_map(|&(id, label)| {
                let value = self.answers.get(id)?;
                let shown = if id == fields::AREA {
                    format!("{value} m²")
                } else {
                    self.catalog
                        .option_label(id, value, &self.answers)
                        .to_string()
                };
                Some(SummaryRow {
                    label,
                    value: shown,
                })
            })
            .collect()
    }

    /// Validates the contact form and marks a submission as outstanding.
    ///
    /// Returns the payload to transmit, or `None` when the honeypot was
    /// filled: in that case nothing should be sent and the session has
    /// already moved to [`Screen::Success`].
    pub fn begin_submission(&mut self) -> Result<Option<Submission>, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }
        if self.screen != Screen::ContactForm {
            return Err(SubmitError::InvalidState(self.screen));
        }
        self.last_error = None;

        if self.contact.is_bot() {
            warn!("honeypot filled; discarding submission");
            self.screen = Screen::Success;
            return Ok(None);
        }
        if let Err(error) = self.contact.validate() {
            let error = SubmitError::from(error);
            self.last_error = Some(error.clone());
            return Err(error);
        }

        let submission = Submission::build(
            &self.form_name,
            &self.catalog,
            &self.answers,
            &self.estimate(),
            &self.contact,
        );
        self.submitting = true;
        debug!(form = %self.form_name, "submission started");
        Ok(Some(submission))
    }

    /// Applies the transport outcome of the outstanding submission.
    ///
    /// On failure the session stays on the contact form with every answer
    /// intact, and the error is kept for display.
    pub fn finish_submission(
        &mut self,
        result: Result<(), TransportError>,
    ) -> Result<(), SubmitError> {
        if !self.submitting {
            return Err(SubmitError::NotInFlight);
        }
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(form = %self.form_name, "submission accepted");
                self.screen = Screen::Success;
                Ok(())
            }
            Err(error) => {
                warn!(%error, "submission failed");
                let error = SubmitError::from(error);
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Validates, transmits through `transport`, and applies the outcome.
    pub async fn submit(
        &mut self,
        transport: &dyn FormTransport,
    ) -> Result<(), SubmitError> {
        let Some(submission) = self.begin_submission()? else {
            return Ok(());
        };
        let result = transport.post_form(&submission).await;
        self.finish_submission(result)
    }

    fn invalid(
        &self,
        action: &'static str,
    ) -> WizardError {
        WizardError::InvalidTransition {
            action,
            screen: self.screen,
        }
    }

    /// Normalises and checks an answer against the question's input rules.
    fn check_answer(
        question: &Question,
        value: &str,
    ) -> Result<String, WizardError> {
        match &question.kind {
            QuestionKind::Choice { .. } => {
                if question.option_label(value).is_none() {
                    return Err(WizardError::UnknownOption {
                        id: question.id.clone(),
                        value: value.to_string(),
                    });
                }
                Ok(value.to_string())
            }
            QuestionKind::FreeText {
                input, max_length, ..
            } => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(WizardError::EmptyAnswer(question.id.clone()));
                }
                if let Some(max) = *max_length {
                    if value.chars().count() > max {
                        return Err(WizardError::TooLong {
                            id: question.id.clone(),
                            max,
                        });
                    }
                }
                if *input == InputKind::Number
                    && !Decimal::from_str(value).is_ok_and(|n| !n.is_sign_negative())
                {
                    return Err(WizardError::NotANumber {
                        id: question.id.clone(),
                        value: value.to_string(),
                    });
                }
                Ok(value.to_string())
            }
        }
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(Arc::new(Catalog::standard()), Arc::new(PricingTable::default()))
    }
}
