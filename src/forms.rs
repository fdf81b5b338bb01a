//! Field schemas, step validation and wizard navigation.
//!
//! # Examples
//!
//! ```rust
//! use agriform::forms::{EntityKind, catalog};
//!
//! assert_eq!(EntityKind::Employee.registry().step_count(), 8);
//! assert!(catalog::farmer().get_dependents("country").contains("village"));
//! ```

#[cfg(feature = "forms")]
pub use agriform_forms::*;
