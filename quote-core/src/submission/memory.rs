use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::info;

use super::{FormTransport, Submission, TransportConfig, TransportError, TransportFactory};

#[derive(Debug, Default)]
struct Inner {
    sent: Vec<Submission>,
    failure: Option<TransportError>,
}

/// Transport that keeps accepted submissions in memory.
///
/// Clones share the same store, so a handle kept by the caller observes what
/// a session sent. A configured failure is returned for every post until it
/// is cleared.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that fails every post with `error`.
    pub fn failing(error: TransportError) -> Self {
        let transport = Self::new();
        transport.set_failure(Some(error));
        transport
    }

    pub fn set_failure(
        &self,
        failure: Option<TransportError>,
    ) {
        self.lock().failure = failure;
    }

    /// Submissions accepted so far, oldest first.
    pub fn sent(&self) -> Vec<Submission> {
        self.lock().sent.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FormTransport for MemoryTransport {
    async fn post_form(
        &self,
        submission: &Submission,
    ) -> Result<(), TransportError> {
        let mut inner = self.lock();
        if let Some(error) = &inner.failure {
            return Err(error.clone());
        }
        info!(fields = submission.fields().len(), body = %submission.encode(), "submission recorded");
        inner.sent.push(submission.clone());
        Ok(())
    }
}

/// [`TransportFactory`] for the `"memory"` backend.
///
/// Every transport it creates shares the store of the wrapped
/// [`MemoryTransport`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTransportFactory {
    transport: MemoryTransport,
}

impl MemoryTransportFactory {
    pub fn new(transport: MemoryTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl TransportFactory for MemoryTransportFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &TransportConfig,
    ) -> Result<Box<dyn FormTransport>, TransportError> {
        Ok(Box::new(self.transport.clone()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{AnswerRecord, ContactDetails, Estimate};

    fn submission() -> Submission {
        Submission::build(
            "quote",
            &Catalog::standard(),
            &AnswerRecord::new(),
            &Estimate {
                low: 1,
                average: 2,
                high: 3,
            },
            &ContactDetails::default(),
        )
    }

    #[tokio::test]
    async fn records_accepted_submissions() {
        let transport = MemoryTransport::new();

        transport.post_form(&submission()).await.unwrap();

        assert_eq!(transport.sent(), vec![submission()]);
    }

    #[tokio::test]
    async fn configured_failure_is_returned_until_cleared() {
        let transport = MemoryTransport::failing(TransportError::Rejected { status: 503 });

        let result = transport.post_form(&submission()).await;
        assert_eq!(result, Err(TransportError::Rejected { status: 503 }));
        assert!(transport.sent().is_empty());

        transport.set_failure(None);
        transport.post_form(&submission()).await.unwrap();
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn factory_transports_share_the_store() {
        let handle = MemoryTransport::new();
        let factory = MemoryTransportFactory::new(handle.clone());

        let created = factory.create(&TransportConfig::default()).await.unwrap();
        created.post_form(&submission()).await.unwrap();

        assert_eq!(factory.backend_name(), "memory");
        assert_eq!(handle.sent().len(), 1);
    }
}
