//! Settings for the wizard binary.
//!
//! Values come from an optional TOML file and are then overridden by command
//! line flags:
//!
//! ```toml
//! form_name = "renovation-quote"
//! pricing_table = "pricing.csv"
//!
//! [transport]
//! backend = "http"
//! endpoint = "https://example.netlify.app/"
//!
//! [logging]
//! level = "info"
//! file = "quote.log"
//! stderr = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use quote_core::submission::TransportConfig;
use quote_core::wizard::DEFAULT_FORM_NAME;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive; `RUST_LOG` or `warn` when unset.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
    /// Mirror log records on stderr.
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            file: None,
            stderr: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub form_name: String,
    pub transport: TransportConfig,
    /// `table,key,value` CSV applied on top of the default prices.
    pub pricing_table: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            form_name: DEFAULT_FORM_NAME.to_string(),
            transport: TransportConfig::default(),
            pricing_table: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub form_name: Option<String>,
    pub backend: Option<String>,
    pub endpoint: Option<String>,
    pub pricing_table: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub quiet: bool,
}

impl QuoteConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(
        &mut self,
        overrides: ConfigOverrides,
    ) {
        if let Some(form_name) = overrides.form_name {
            self.form_name = form_name;
        }
        if let Some(backend) = overrides.backend {
            self.transport.backend = backend;
        }
        if let Some(endpoint) = overrides.endpoint {
            self.transport.endpoint = endpoint;
        }
        if overrides.pricing_table.is_some() {
            self.pricing_table = overrides.pricing_table;
        }
        if overrides.log_level.is_some() {
            self.logging.level = overrides.log_level;
        }
        if overrides.log_file.is_some() {
            self.logging.file = overrides.log_file;
        }
        if overrides.quiet {
            self.logging.stderr = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = QuoteConfig::from_toml_str("").unwrap();

        assert_eq!(config, QuoteConfig::default());
        assert_eq!(config.form_name, "renovation-quote");
        assert_eq!(config.transport.backend, "http");
        assert_eq!(config.transport.endpoint, "http://localhost:8888/");
        assert!(config.logging.stderr);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = QuoteConfig::from_toml_str(
            r#"
            pricing_table = "prices.csv"

            [transport]
            endpoint = "https://quotes.example.fr/"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.transport.backend, "http");
        assert_eq!(config.transport.endpoint, "https://quotes.example.fr/");
        assert_eq!(config.pricing_table, Some(PathBuf::from("prices.csv")));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.file, None);
        assert_eq!(config.form_name, DEFAULT_FORM_NAME);
    }

    #[test]
    fn malformed_file_is_rejected() {
        assert!(QuoteConfig::from_toml_str("form_name = [").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = QuoteConfig::load(Path::new("/nonexistent/quote.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/quote.toml"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = QuoteConfig::from_toml_str(
            r#"
            form_name = "devis"

            [transport]
            backend = "http"
            endpoint = "https://quotes.example.fr/"
            "#,
        )
        .unwrap();

        config.apply_overrides(ConfigOverrides {
            backend: Some("memory".to_string()),
            log_level: Some("info".to_string()),
            quiet: true,
            ..ConfigOverrides::default()
        });

        assert_eq!(config.form_name, "devis");
        assert_eq!(config.transport.backend, "memory");
        assert_eq!(config.transport.endpoint, "https://quotes.example.fr/");
        assert_eq!(config.logging.level.as_deref(), Some("info"));
        assert!(!config.logging.stderr);
    }
}
