use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_core::calculations::{PricingEngine, PricingTable};
use quote_data::{AnswerLoader, PricingTableLoader};
use tracing_subscriber::EnvFilter;

/// Print a price estimate for every answer row of a CSV file.
///
/// The header row names answer fields (`renovationType`, `area`,
/// `propertyType`, ...). Empty cells are treated as unanswered.
#[derive(Parser, Debug)]
#[command(name = "quote-estimate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing answer records
    #[arg(short, long)]
    answers: PathBuf,

    /// Optional `table,key,value` CSV applied on top of the default prices
    #[arg(short, long)]
    pricing: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let table = match &args.pricing {
        Some(path) => PricingTableLoader::load_from_file(path)
            .with_context(|| format!("Failed to load pricing table: {}", path.display()))?,
        None => PricingTable::default(),
    };

    let records = AnswerLoader::load_from_file(&args.answers)
        .with_context(|| format!("Failed to load answers: {}", args.answers.display()))?;

    eprintln!("Parsed {} answer records from CSV", records.len());

    let engine = PricingEngine::new(&table);
    for (row, answers) in records.iter().enumerate() {
        let estimate = engine.estimate(answers);
        println!("{}: {}", row + 1, estimate);
    }

    Ok(())
}
