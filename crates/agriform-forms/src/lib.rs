//! Stepped form engine for agricultural registration workflows
//!
//! This crate provides:
//! - Field definitions with declarative validation rules
//! - Per-entity schema registries with cascading select dependencies
//! - Step-scoped validation with blank normalization
//! - A wizard controller that gates navigation on validation and hands
//!   finished forms to a pluggable submitter
//! - Built-in registries for farmer, employee, admin-role and identity forms

pub mod admin;
pub mod catalog;
pub mod field;
pub mod fields;
pub mod rules;
pub mod schema;
pub mod step_validator;
pub mod submission;
pub mod validators;
pub mod value;
pub mod wizard;

pub use admin::{AdminSection, UserRoleSection};
pub use catalog::UploadLimits;
pub use field::{FieldDefinition, FieldError, FieldKind, FieldResult};
pub use fields::{AgeValidator, ChoiceValidator, DependentChoiceValidator, FileValidator};
pub use rules::{CustomRule, Rule};
pub use schema::{EntityKind, SchemaError, SchemaRegistry, SchemaRegistryBuilder, StepSchema};
pub use step_validator::{StepValidator, ValidationResult};
pub use submission::{
	FormSubmitter, SubmissionError, SubmissionOperation, SubmissionReceipt, TransportFailure,
};
pub use validators::{MinLengthValidator, PatternValidator};
pub use value::{FieldValue, FileRef, FormValueMap};
pub use wizard::{CompletionPolicy, StepOutcome, WizardController, WizardError};
