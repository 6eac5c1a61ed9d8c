//! Renovation price estimation.
//!
//! The estimate is built on a running base price. Each step either replaces
//! nothing or multiplies/adds into the accumulator, in this fixed order:
//!
//! | Step | Field              | Adjustment                                        |
//! |------|--------------------|---------------------------------------------------|
//! | 1    | `renovationType`   | base price lookup (default 30 000)                |
//! | 2    | `propertyType`     | × multiplier (default 1.0)                        |
//! | 3    | `currentCondition` | × multiplier (default 1.0)                        |
//! | 4    | `propertyAge`      | × multiplier (default 1.0)                        |
//! | 5    | `desiredFinish`    | × multiplier (default 1.0)                        |
//! | 6    | `area`             | × tier multiplier, then + surcharge above 200 m²  |
//! | 7    | `timeline`         | × multiplier (urgent 1.2, 1-3 mois 1.1)           |
//! | 8    | -                  | range: low × 0.85, average, high × 1.25, rounded  |
//!
//! Later percentage adjustments compound on earlier ones, so the order is
//! part of the pricing model.
//!
//! # Example
//!
//! ```
//! use quote_core::AnswerRecord;
//! use quote_core::calculations::{PricingEngine, PricingTable};
//!
//! let answers: AnswerRecord = [("renovationType", "kitchen"), ("area", "250")]
//!     .into_iter()
//!     .collect();
//!
//! let table = PricingTable::default();
//! let estimate = PricingEngine::new(&table).estimate(&answers);
//!
//! assert_eq!(estimate.low, 39950);
//! assert_eq!(estimate.average, 47000);
//! assert_eq!(estimate.high, 58750);
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::calculations::common::{parse_leading_int, to_whole_units};
use crate::models::{AnswerRecord, Estimate, fields};

/// Errors reported by [`PricingTable::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingTableError {
    #[error("negative value {value} for '{key}' in table '{table}'")]
    NegativeValue {
        table: &'static str,
        key: String,
        value: Decimal,
    },

    #[error("range factors must satisfy low <= 1 <= high (got {low} / {high})")]
    InvalidRange { low: Decimal, high: Decimal },
}

/// Multiplier applied when the parsed area is strictly above `above`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaTier {
    pub above: i64,
    pub multiplier: Decimal,
}

/// Lookup tables and constants used by the [`PricingEngine`].
///
/// `Default` yields the published price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTable {
    /// Base price per renovation type.
    pub renovation_base: BTreeMap<String, Decimal>,
    /// Base price used when the renovation type is missing or unknown.
    pub default_base: Decimal,
    pub property_type: BTreeMap<String, Decimal>,
    pub current_condition: BTreeMap<String, Decimal>,
    pub property_age: BTreeMap<String, Decimal>,
    pub desired_finish: BTreeMap<String, Decimal>,
    pub timeline: BTreeMap<String, Decimal>,
    /// Checked in order; the first tier whose threshold is exceeded applies.
    pub area_tiers: Vec<AreaTier>,
    /// Area above which every extra unit adds `surcharge_per_unit`.
    pub surcharge_threshold: i64,
    pub surcharge_per_unit: Decimal,
    pub low_factor: Decimal,
    pub high_factor: Decimal,
}

fn table(entries: &[(&str, i64, u32)]) -> BTreeMap<String, Decimal> {
    entries
        .iter()
        .map(|(key, num, scale)| (key.to_string(), Decimal::new(*num, *scale)))
        .collect()
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            renovation_base: table(&[
                ("complete", 60000, 0),
                ("partial", 30000, 0),
                ("kitchen", 18000, 0),
                ("bathroom", 14000, 0),
                ("bedroom", 8000, 0),
                ("livingroom", 12000, 0),
                ("facade", 25000, 0),
                ("roofing", 20000, 0),
                ("insulation", 15000, 0),
                ("electrical", 10000, 0),
                ("plumbing", 12000, 0),
                ("flooring", 8000, 0),
                ("painting", 5000, 0),
                ("extension", 45000, 0),
            ]),
            default_base: Decimal::new(30000, 0),
            property_type: table(&[
                ("house", 15, 1),
                ("flat", 10, 1),
                ("office", 13, 1),
                ("commercial", 18, 1),
            ]),
            current_condition: table(&[
                ("excellent", 7, 1),
                ("good", 9, 1),
                ("average", 10, 1),
                ("poor", 13, 1),
                ("very-poor", 16, 1),
            ]),
            // Union of the short and long age scales used by the site.
            property_age: table(&[
                ("new", 8, 1),
                ("0-10", 9, 1),
                ("10-30", 10, 1),
                ("30+", 11, 1),
                ("30-50", 11, 1),
                ("50+", 13, 1),
            ]),
            desired_finish: table(&[
                ("basic", 85, 2),
                ("standard", 10, 1),
                ("premium", 13, 1),
                ("luxury", 16, 1),
            ]),
            timeline: table(&[("urgent", 12, 1), ("1-3 mois", 11, 1)]),
            area_tiers: vec![
                AreaTier {
                    above: 150,
                    multiplier: Decimal::new(15, 1),
                },
                AreaTier {
                    above: 100,
                    multiplier: Decimal::new(13, 1),
                },
                AreaTier {
                    above: 50,
                    multiplier: Decimal::new(11, 1),
                },
            ],
            surcharge_threshold: 200,
            surcharge_per_unit: Decimal::new(400, 0),
            low_factor: Decimal::new(85, 2),
            high_factor: Decimal::new(125, 2),
        }
    }
}

impl PricingTable {
    /// Rejects tables that could break `low <= average <= high`.
    pub fn validate(&self) -> Result<(), PricingTableError> {
        let maps: [(&'static str, &BTreeMap<String, Decimal>); 6] = [
            ("renovation_base", &self.renovation_base),
            ("property_type", &self.property_type),
            ("current_condition", &self.current_condition),
            ("property_age", &self.property_age),
            ("desired_finish", &self.desired_finish),
            ("timeline", &self.timeline),
        ];
        for (name, map) in maps {
            if let Some((key, value)) = map.iter().find(|(_, v)| v.is_sign_negative()) {
                return Err(PricingTableError::NegativeValue {
                    table: name,
                    key: key.clone(),
                    value: *value,
                });
            }
        }

        let scalars = [
            ("default_base", self.default_base),
            ("surcharge_per_unit", self.surcharge_per_unit),
        ];
        for (key, value) in scalars {
            if value.is_sign_negative() {
                return Err(PricingTableError::NegativeValue {
                    table: "constants",
                    key: key.to_string(),
                    value,
                });
            }
        }

        if let Some(tier) = self.area_tiers.iter().find(|t| t.multiplier.is_sign_negative()) {
            return Err(PricingTableError::NegativeValue {
                table: "area_tiers",
                key: tier.above.to_string(),
                value: tier.multiplier,
            });
        }

        if self.low_factor.is_sign_negative()
            || self.low_factor > Decimal::ONE
            || self.high_factor < Decimal::ONE
        {
            return Err(PricingTableError::InvalidRange {
                low: self.low_factor,
                high: self.high_factor,
            });
        }

        Ok(())
    }
}

/// Estimates a price range from an answer record.
#[derive(Debug, Clone)]
pub struct PricingEngine<'a> {
    table: &'a PricingTable,
}

impl<'a> PricingEngine<'a> {
    pub fn new(table: &'a PricingTable) -> Self {
        Self { table }
    }

    /// Computes the estimate. Missing or unrecognised answers fall back to
    /// the documented defaults, so every record yields a range.
    pub fn estimate(
        &self,
        answers: &AnswerRecord,
    ) -> Estimate {
        let mut price = self.base_price(answers.get(fields::RENOVATION_TYPE));

        price = price.saturating_mul(Self::multiplier(
            &self.table.property_type,
            answers.get(fields::PROPERTY_TYPE),
        ));
        price = price.saturating_mul(Self::multiplier(
            &self.table.current_condition,
            answers.get(fields::CURRENT_CONDITION),
        ));
        price = price.saturating_mul(Self::multiplier(
            &self.table.property_age,
            answers.get(fields::PROPERTY_AGE),
        ));
        price = price.saturating_mul(Self::multiplier(
            &self.table.desired_finish,
            answers.get(fields::DESIRED_FINISH),
        ));

        price = self.area_adjustment(price, answers.get(fields::AREA));

        price = price.saturating_mul(Self::multiplier(
            &self.table.timeline,
            answers.get(fields::TIMELINE),
        ));

        trace!(%price, "adjusted base price");
        self.range(price)
    }

    fn base_price(
        &self,
        renovation_type: Option<&str>,
    ) -> Decimal {
        renovation_type
            .and_then(|key| self.table.renovation_base.get(key))
            .copied()
            .unwrap_or(self.table.default_base)
    }

    fn multiplier(
        map: &BTreeMap<String, Decimal>,
        key: Option<&str>,
    ) -> Decimal {
        key.and_then(|k| map.get(k)).copied().unwrap_or(Decimal::ONE)
    }

    /// Applies the area tier and the per-unit surcharge above the threshold.
    fn area_adjustment(
        &self,
        price: Decimal,
        area: Option<&str>,
    ) -> Decimal {
        let Some(area) = area.and_then(parse_leading_int) else {
            return price;
        };

        let mut adjusted = match self.table.area_tiers.iter().find(|t| area > t.above) {
            Some(tier) => price.saturating_mul(tier.multiplier),
            None => price,
        };

        if area > self.table.surcharge_threshold {
            let excess = Decimal::from(area - self.table.surcharge_threshold);
            adjusted = adjusted.saturating_add(excess.saturating_mul(self.table.surcharge_per_unit));
        }

        adjusted
    }

    fn range(
        &self,
        price: Decimal,
    ) -> Estimate {
        Estimate {
            low: to_whole_units(price.saturating_mul(self.table.low_factor)),
            average: to_whole_units(price),
            high: to_whole_units(price.saturating_mul(self.table.high_factor)),
        }
    }
}

/// Estimates with the default [`PricingTable`].
pub fn estimate(answers: &AnswerRecord) -> Estimate {
    PricingEngine::new(&PricingTable::default()).estimate(answers)
}
