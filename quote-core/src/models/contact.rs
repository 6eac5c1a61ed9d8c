use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ().-]{6,20}$").expect("phone pattern is valid"));

/// Input-layer validation failures on the contact form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{0}' is required")]
    Required(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("'{0}' is not a valid phone number")]
    InvalidPhone(String),

    #[error("consent to data processing must be accepted")]
    ConsentMissing,
}

/// Contact details entered on the final form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Optional free-form message.
    pub project_description: String,
    /// Hidden honeypot; genuine visitors never fill it.
    pub bot_field: String,
    pub consent: bool,
}

impl ContactDetails {
    /// Checks required fields and formats, in form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::Required("phone"));
        }
        if !PHONE_RE.is_match(self.phone.trim()) {
            return Err(ValidationError::InvalidPhone(self.phone.clone()));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("email"));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if !self.consent {
            return Err(ValidationError::ConsentMissing);
        }
        Ok(())
    }

    /// True when the honeypot holds anything.
    pub fn is_bot(&self) -> bool {
        !self.bot_field.is_empty()
    }
}
