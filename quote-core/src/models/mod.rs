mod answers;
mod contact;
mod estimate;
mod question;

pub mod fields;

pub use answers::AnswerRecord;
pub use contact::{ContactDetails, ValidationError};
pub use estimate::Estimate;
pub use question::{ChoiceOption, Gate, InputKind, Question, QuestionKind};
