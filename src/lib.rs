//! # agriform
//!
//! Stepped registration forms for farmer and employee records.
//!
//! A [`WizardController`] walks a multi-step form, validating each step
//! before it moves forward and clearing dependent selections when a parent
//! changes. Finished forms go to a [`FormSubmitter`]; the HTTP
//! implementation stores them through the registry API.
//!
//! ## Feature Flags
//!
//! - `forms` - schema registries, validation and the wizard controller
//! - `client` - reqwest transport, submission adapter and identity flows
//!   (implies `forms`)
//! - `conf` - layered settings from TOML files and `AGRIFORM_*` variables
//! - `full` (default) - all of the above
//!
//! ## Quick Start
//!
//! ```
//! use agriform::forms::catalog;
//! use agriform::{FormValueMap, StepValidator};
//!
//! let registry = catalog::farmer();
//! let address = registry.get_schema(1).unwrap();
//!
//! let values: FormValueMap = [("country", "India"), ("pincode", "5000")].into_iter().collect();
//! let result = StepValidator::new().validate(address, &values);
//!
//! assert!(result.errors().unwrap()["pincode"].contains("6-digit"));
//! ```

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "forms")]
pub mod forms;

#[cfg(feature = "forms")]
pub use agriform_forms::{
	EntityKind, FieldValue, FileRef, FormSubmitter, FormValueMap, SchemaRegistry, StepOutcome,
	StepValidator, SubmissionError, ValidationResult, WizardController, WizardError,
};

#[cfg(feature = "client")]
pub use agriform_client::{ApiClient, ClientError, RecordSubmissionAdapter, SessionContext};

#[cfg(feature = "conf")]
pub use agriform_conf::{Settings, SettingsError};
