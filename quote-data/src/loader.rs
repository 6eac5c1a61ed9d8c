//! CSV loaders for pricing overrides and batches of answer records.
//!
//! ## Pricing CSV
//!
//! | Column  | Type    | Notes                                                   |
//! |---------|---------|---------------------------------------------------------|
//! | `table` | string  | `renovation_base`, `property_type`, `current_condition`, `property_age`, `desired_finish`, `timeline` |
//! | `key`   | string  | Answer value; `*` in `renovation_base` sets the default |
//! | `value` | decimal | Base price or multiplier, must not be negative          |
//!
//! ```csv
//! table,key,value
//! renovation_base,kitchen,21000
//! property_type,commercial,2.0
//! ```
//!
//! ## Answers CSV
//!
//! The header row names answer fields (`renovationType`, `area`, ...). Each
//! following row becomes one answer record; empty cells are left unanswered.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use quote_core::calculations::{PricingTable, PricingTableError};
use quote_core::AnswerRecord;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading CSV data.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown pricing table '{0}'")]
    UnknownTable(String),

    #[error("row {row}: empty key in table '{table}'")]
    EmptyKey { row: usize, table: String },

    #[error("invalid pricing table: {0}")]
    InvalidTable(#[from] PricingTableError),
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

/// A single `table,key,value` row.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PricingRecord {
    pub table: String,
    pub key: String,
    pub value: Decimal,
}

/// Key that addresses the default base price in `renovation_base`.
pub const DEFAULT_BASE_KEY: &str = "*";

/// Loader for pricing-table overrides.
pub struct PricingTableLoader;

impl PricingTableLoader {
    /// Parse pricing rows from any CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PricingRecord>, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PricingRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Apply `records` on top of `table` and validate the result.
    ///
    /// Rows are applied in order, so a later row for the same key wins. The
    /// table is left untouched when any row is rejected.
    pub fn apply(
        table: &mut PricingTable,
        records: &[PricingRecord],
    ) -> Result<(), LoaderError> {
        let mut updated = table.clone();

        for (index, record) in records.iter().enumerate() {
            if record.key.is_empty() {
                return Err(LoaderError::EmptyKey {
                    row: index + 1,
                    table: record.table.clone(),
                });
            }
            if record.table == "renovation_base" && record.key == DEFAULT_BASE_KEY {
                updated.default_base = record.value;
                continue;
            }
            let map = Self::table_mut(&mut updated, &record.table)?;
            map.insert(record.key.clone(), record.value);
        }

        updated.validate()?;
        debug!(rows = records.len(), "pricing overrides applied");
        *table = updated;
        Ok(())
    }

    /// Default table with the overrides read from `reader`.
    pub fn load<R: Read>(reader: R) -> Result<PricingTable, LoaderError> {
        let records = Self::parse(reader)?;
        let mut table = PricingTable::default();
        Self::apply(&mut table, &records)?;
        Ok(table)
    }

    pub fn load_from_file(path: &Path) -> Result<PricingTable, LoaderError> {
        Self::load(File::open(path)?)
    }

    fn table_mut<'a>(
        table: &'a mut PricingTable,
        name: &str,
    ) -> Result<&'a mut BTreeMap<String, Decimal>, LoaderError> {
        match name {
            "renovation_base" => Ok(&mut table.renovation_base),
            "property_type" => Ok(&mut table.property_type),
            "current_condition" => Ok(&mut table.current_condition),
            "property_age" => Ok(&mut table.property_age),
            "desired_finish" => Ok(&mut table.desired_finish),
            "timeline" => Ok(&mut table.timeline),
            other => Err(LoaderError::UnknownTable(other.to_string())),
        }
    }
}

/// Loader for batches of answer records.
pub struct AnswerLoader;

impl AnswerLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<AnswerRecord>, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let row: BTreeMap<String, String> = result?;
            records.push(
                row.into_iter()
                    .filter(|(_, value)| !value.is_empty())
                    .collect(),
            );
        }

        Ok(records)
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<AnswerRecord>, LoaderError> {
        Self::parse(File::open(path)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_core::calculations::PricingEngine;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_reads_rows_in_order() {
        let csv = "table,key,value\nrenovation_base,kitchen,21000\nproperty_type, commercial ,2.0\n";

        let records = PricingTableLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                PricingRecord {
                    table: "renovation_base".to_string(),
                    key: "kitchen".to_string(),
                    value: dec!(21000),
                },
                PricingRecord {
                    table: "property_type".to_string(),
                    key: "commercial".to_string(),
                    value: dec!(2.0),
                },
            ]
        );
    }

    #[test]
    fn parse_rejects_non_decimal_value() {
        let csv = "table,key,value\nrenovation_base,kitchen,cheap\n";

        assert!(matches!(
            PricingTableLoader::parse(csv.as_bytes()),
            Err(LoaderError::CsvParse(_))
        ));
    }

    #[test]
    fn apply_overrides_entries_and_default_base() {
        let csv = "table,key,value\nrenovation_base,kitchen,21000\nrenovation_base,*,35000\ntimeline,3-6 mois,1.05\n";

        let table = PricingTableLoader::load(csv.as_bytes()).unwrap();

        assert_eq!(table.renovation_base["kitchen"], dec!(21000));
        assert_eq!(table.default_base, dec!(35000));
        assert_eq!(table.timeline["3-6 mois"], dec!(1.05));
        assert_eq!(table.renovation_base["bathroom"], dec!(14000));
    }

    #[test]
    fn overrides_change_estimates() {
        let csv = "table,key,value\nrenovation_base,*,40000\n";
        let table = PricingTableLoader::load(csv.as_bytes()).unwrap();

        let estimate = PricingEngine::new(&table).estimate(&AnswerRecord::new());

        assert_eq!(estimate.average, 40000);
    }

    #[test]
    fn unknown_table_is_rejected_and_table_untouched() {
        let records = vec![
            PricingRecord {
                table: "property_type".to_string(),
                key: "barn".to_string(),
                value: dec!(1.2),
            },
            PricingRecord {
                table: "colour".to_string(),
                key: "red".to_string(),
                value: dec!(1.0),
            },
        ];
        let mut table = PricingTable::default();

        let result = PricingTableLoader::apply(&mut table, &records);

        assert!(matches!(result, Err(LoaderError::UnknownTable(name)) if name == "colour"));
        assert_eq!(table, PricingTable::default());
    }

    #[test]
    fn negative_value_is_rejected() {
        let csv = "table,key,value\nproperty_age,50+,-1\n";

        assert!(matches!(
            PricingTableLoader::load(csv.as_bytes()),
            Err(LoaderError::InvalidTable(PricingTableError::NegativeValue { .. }))
        ));
    }

    #[test]
    fn empty_key_is_rejected() {
        let csv = "table,key,value\ntimeline,,1.1\n";

        assert!(matches!(
            PricingTableLoader::load(csv.as_bytes()),
            Err(LoaderError::EmptyKey { row: 1, .. })
        ));
    }

    #[test]
    fn answers_skip_empty_cells() {
        let csv = "renovationType,area,timeline\nkitchen,250,\n,,urgent\n";

        let records = AnswerLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("renovationType"), Some("kitchen"));
        assert_eq!(records[0].get("area"), Some("250"));
        assert_eq!(records[0].iter().count(), 2);
        assert_eq!(records[1].iter().collect::<Vec<_>>(), vec![("timeline", "urgent")]);
    }
}
