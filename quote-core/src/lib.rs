pub mod calculations;
pub mod catalog;
pub mod models;
pub mod submission;
pub mod wizard;

pub use catalog::{Catalog, CatalogError};
pub use models::*;
pub use submission::{FormTransport, Submission, TransportError};
pub use wizard::{Screen, SubmitError, WizardError, WizardSession};
