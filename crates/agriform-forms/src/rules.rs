//! Validation rules attached to field definitions

use crate::field::{FieldError, FieldResult};
use crate::fields::{AgeValidator, ChoiceValidator, DependentChoiceValidator, FileValidator};
use crate::validators::{MinLengthValidator, PatternValidator};
use crate::value::{FieldValue, FormValueMap};
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

type CheckFn = dyn Fn(&FieldValue, &FormValueMap) -> FieldResult<()> + Send + Sync;

/// A named, caller-supplied check
#[derive(Clone)]
pub struct CustomRule {
	name: String,
	check: Arc<CheckFn>,
}

impl CustomRule {
	pub fn new<F>(name: impl Into<String>, check: F) -> Self
	where
		F: Fn(&FieldValue, &FormValueMap) -> FieldResult<()> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			check: Arc::new(check),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Debug for CustomRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CustomRule")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// One constraint on a field value.
///
/// `Required` and `RequiredIf` decide whether an absent value is an error;
/// they are evaluated by the step validator before any other rule. The
/// remaining rules only ever see a present (normalized) value.
#[derive(Debug, Clone)]
pub enum Rule {
	Required {
		message: String,
	},
	/// Required once `trigger` holds a value equal to `equals`
	RequiredIf {
		trigger: String,
		equals: String,
		message: String,
	},
	Pattern(PatternValidator),
	MinLength(MinLengthValidator),
	NumberRange {
		min: Option<f64>,
		max: Option<f64>,
		message: String,
	},
	AgeRange(AgeValidator),
	/// Must equal the value of another field (password confirmation)
	EqualsField {
		other: String,
		message: String,
	},
	File(FileValidator),
	OneOf(ChoiceValidator),
	DependentChoice(DependentChoiceValidator),
	Custom(CustomRule),
}

impl Rule {
	/// Whether this rule makes the field required given the current values
	pub fn requires(&self, values: &FormValueMap) -> Option<&str> {
		match self {
			Rule::Required { message } => Some(message),
			Rule::RequiredIf {
				trigger,
				equals,
				message,
			} => values
				.normalized(trigger)
				.filter(|v| v.to_text().trim() == equals.as_str())
				.map(|_| message.as_str()),
			_ => None,
		}
	}

	/// Check a present value.
	///
	/// Presence rules always pass here.
	pub fn check(&self, value: &FieldValue, values: &FormValueMap, today: NaiveDate) -> FieldResult<()> {
		match self {
			Rule::Required { .. } | Rule::RequiredIf { .. } => Ok(()),
			Rule::Pattern(v) => v.validate(value.to_text().trim()),
			Rule::MinLength(v) => v.validate(&value.to_text()),
			Rule::NumberRange { min, max, message } => {
				let n = value
					.as_number()
					.ok_or_else(|| FieldError::Invalid("Enter a number".to_string()))?;
				let below = min.is_some_and(|min| n < min);
				let above = max.is_some_and(|max| n > max);
				if below || above {
					Err(FieldError::Validation(message.clone()))
				} else {
					Ok(())
				}
			}
			Rule::AgeRange(v) => v.validate(&value.to_text(), today),
			Rule::EqualsField { other, message } => {
				let matches = values
					.get(other)
					.is_some_and(|o| o.to_text() == value.to_text());
				if matches {
					Ok(())
				} else {
					Err(FieldError::Validation(message.clone()))
				}
			}
			Rule::File(v) => match value.as_file() {
				Some(file) => v.validate(file),
				None => Err(FieldError::Invalid("Expected a file upload".to_string())),
			},
			Rule::OneOf(v) => v.validate(value),
			Rule::DependentChoice(v) => v.validate(value, values),
			Rule::Custom(rule) => (rule.check)(value, values),
		}
	}
}
