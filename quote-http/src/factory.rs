use async_trait::async_trait;

use quote_core::submission::{FormTransport, TransportConfig, TransportError, TransportFactory};

use crate::transport::HttpTransport;

/// [`TransportFactory`] for the `"http"` backend.
///
/// ```rust,no_run
/// use quote_core::submission::TransportRegistry;
/// use quote_http::HttpTransportFactory;
///
/// let mut registry = TransportRegistry::new();
/// registry.register(Box::new(HttpTransportFactory));
/// ```
pub struct HttpTransportFactory;

#[async_trait]
impl TransportFactory for HttpTransportFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Builds an [`HttpTransport`] posting to `config.endpoint`.
    async fn create(
        &self,
        config: &TransportConfig,
    ) -> Result<Box<dyn FormTransport>, TransportError> {
        Ok(Box::new(HttpTransport::new(&config.endpoint)?))
    }
}

#[cfg(test)]
mod tests {
    use quote_core::submission::{TransportConfig, TransportError, TransportFactory};

    use super::HttpTransportFactory;

    #[test]
    fn backend_name_is_http() {
        assert_eq!(HttpTransportFactory.backend_name(), "http");
    }

    #[tokio::test]
    async fn creates_transport_for_default_config() {
        let result = HttpTransportFactory.create(&TransportConfig::default()).await;

        assert!(result.is_ok(), "failed to create transport: {:?}", result.err().map(|e| e.to_string()));
    }

    #[tokio::test]
    async fn invalid_endpoint_is_configuration_error() {
        let config = TransportConfig {
            backend: "http".to_string(),
            endpoint: "not a url".to_string(),
        };

        let result = HttpTransportFactory.create(&config).await;

        assert!(matches!(result, Err(TransportError::Configuration(_))));
    }
}
