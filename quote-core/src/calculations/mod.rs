//! Price estimation for renovation quotes.
//!
//! The engine is a pure function of the answer record and a pricing table;
//! see [`pricing`] for the order in which adjustments compound.

pub mod common;
pub mod pricing;

pub use pricing::{AreaTier, PricingEngine, PricingTable, PricingTableError, estimate};
