use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use quote_core::Catalog;
use quote_core::WizardSession;
use quote_core::calculations::PricingTable;
use quote_core::submission::{MemoryTransport, MemoryTransportFactory, TransportRegistry};
use quote_data::PricingTableLoader;
use quote_http::HttpTransportFactory;
use tracing::debug;

use crate::config::QuoteConfig;

/// Registry with every transport backend this binary ships.
///
/// The `memory` backend keeps submissions in `dry_run`, so a caller holding
/// that handle can inspect what would have been sent.
pub fn build_registry(dry_run: MemoryTransport) -> TransportRegistry {
    let mut registry = TransportRegistry::new();
    registry.register(Box::new(HttpTransportFactory));
    registry.register(Box::new(MemoryTransportFactory::new(dry_run)));
    registry
}

/// Default prices, with the overrides from `path` applied when given.
pub fn load_pricing_table(path: Option<&Path>) -> Result<PricingTable> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading pricing overrides");
            PricingTableLoader::load_from_file(path)
                .with_context(|| format!("Failed to load pricing table: {}", path.display()))
        }
        None => Ok(PricingTable::default()),
    }
}

/// A fresh session over the standard catalog.
pub fn new_session(
    config: &QuoteConfig,
    pricing: PricingTable,
) -> WizardSession {
    WizardSession::new(Arc::new(Catalog::standard()), Arc::new(pricing))
        .with_form_name(config.form_name.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_core::submission::TransportConfig;

    use super::*;

    #[test]
    fn registry_offers_http_and_memory() {
        let registry = build_registry(MemoryTransport::new());

        assert_eq!(registry.available_backends(), vec!["http", "memory"]);
    }

    #[tokio::test]
    async fn unknown_backend_is_a_configuration_error() {
        let registry = build_registry(MemoryTransport::new());
        let config = TransportConfig {
            backend: "smtp".to_string(),
            endpoint: String::new(),
        };

        let err = registry.create(&config).await.err().unwrap();

        assert!(err.to_string().contains("smtp"));
    }

    #[test]
    fn no_pricing_path_uses_defaults() {
        assert_eq!(load_pricing_table(None).unwrap(), PricingTable::default());
    }

    #[test]
    fn missing_pricing_file_names_the_path() {
        let err = load_pricing_table(Some(Path::new("/nonexistent/prices.csv"))).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/prices.csv"));
    }

    #[test]
    fn session_uses_configured_form_name() {
        let config = QuoteConfig {
            form_name: "devis-cuisine".to_string(),
            ..QuoteConfig::default()
        };

        let session = new_session(&config, PricingTable::default());

        assert_eq!(session.form_name(), "devis-cuisine");
    }
}
