pub mod loader;

pub use loader::{AnswerLoader, LoaderError, PricingRecord, PricingTableLoader};
