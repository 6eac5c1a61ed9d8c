use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quote_core::submission::MemoryTransport;
use tracing::{debug, info};

use quote_cli::config::{ConfigOverrides, QuoteConfig};
use quote_cli::terminal::Terminal;
use quote_cli::{app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Interactive renovation quote wizard.
///
/// Asks the project questions, shows an estimated price range and sends the
/// answers with the visitor's contact details to the configured endpoint.
#[derive(Debug, Parser)]
#[command(name = "quote-wizard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transport backend (`http` or `memory`).
    #[arg(long)]
    backend: Option<String>,

    /// Form endpoint for the `http` backend.
    #[arg(long)]
    endpoint: Option<String>,

    /// Form name sent with every submission.
    #[arg(long)]
    form_name: Option<String>,

    /// `table,key,value` CSV of pricing overrides.
    #[arg(long)]
    pricing: Option<PathBuf>,

    /// Log filter (e.g. `info` or `quote_core=debug`).
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Keep log records off stderr.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            form_name: self.form_name.clone(),
            backend: self.backend.clone(),
            endpoint: self.endpoint.clone(),
            pricing_table: self.pricing.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            quiet: self.quiet,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => QuoteConfig::load(path)?,
        None => QuoteConfig::default(),
    };
    config.apply_overrides(cli.overrides());

    if let Some(level) = &config.logging.level {
        logging::set_log_level(level)?;
    }
    if let Some(file) = &config.logging.file {
        logging::enable_file_logging(file)?;
    }
    if !config.logging.stderr {
        logging::set_stderr_enabled(false)?;
    }

    let pricing = app::load_pricing_table(config.pricing_table.as_deref())?;

    let dry_run = MemoryTransport::new();
    let registry = app::build_registry(dry_run.clone());
    debug!(backend = %config.transport.backend, "creating transport");
    let transport = registry
        .create(&config.transport)
        .await
        .with_context(|| format!("Failed to create '{}' transport", config.transport.backend))?;

    let mut session = app::new_session(&config, pricing);
    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());
    terminal.run(&mut session, &*transport).await?;

    let recorded = dry_run.sent().len();
    if recorded > 0 {
        info!(recorded, "dry-run submissions kept in memory");
    }

    Ok(())
}
