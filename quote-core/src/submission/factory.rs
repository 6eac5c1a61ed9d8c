use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::transport::{FormTransport, TransportError};

/// Backend-agnostic transport configuration.
///
/// `backend` must match the [`TransportFactory::backend_name`] of a
/// registered factory. `endpoint` is passed through unchanged; its meaning
/// is backend-specific.
///
/// | backend  | endpoint examples                     |
/// |----------|---------------------------------------|
/// | `http`   | `https://example.netlify.app/`        |
/// | `memory` | ignored                               |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub backend: String,
    pub endpoint: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            endpoint: "http://localhost:8888/".to_string(),
        }
    }
}

/// One implementation per transport backend, registered with a
/// [`TransportRegistry`] at startup.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &TransportConfig,
    ) -> Result<Box<dyn FormTransport>, TransportError>;
}

/// Registry of [`TransportFactory`] instances, keyed by backend name.
pub struct TransportRegistry {
    factories: HashMap<&'static str, Box<dyn TransportFactory>>,
}

impl TransportRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a backend factory, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn TransportFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatches to the factory matching `config.backend`.
    ///
    /// # Errors
    /// * [`TransportError::Configuration`] when no factory is registered for
    ///   the requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &TransportConfig,
    ) -> Result<Box<dyn FormTransport>, TransportError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                TransportError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::new()
    }
}
