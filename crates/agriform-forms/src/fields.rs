// Typed field checks
pub mod choice_field;
pub mod date_field;
pub mod file_field;

pub use choice_field::{ChoiceValidator, DependentChoiceValidator};
pub use date_field::{AgeValidator, age_on, parse_date};
pub use file_field::FileValidator;
