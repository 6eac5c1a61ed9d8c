use async_trait::async_trait;
use thiserror::Error;

use super::Submission;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered outside the 2xx range.
    #[error("submission rejected with HTTP status {status}")]
    Rejected { status: u16 },

    #[error("transport configuration error: {0}")]
    Configuration(String),
}

/// Delivers a [`Submission`] to the form-handling endpoint.
///
/// Implementations report acceptance with `Ok(())`; every other outcome is a
/// [`TransportError`] and leaves the caller free to retry.
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn post_form(
        &self,
        submission: &Submission,
    ) -> Result<(), TransportError>;
}
