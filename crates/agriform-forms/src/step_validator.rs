//! Validation of the fields that belong to one step

use crate::field::{FieldDefinition, FieldError};
use crate::schema::StepSchema;
use crate::value::FormValueMap;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Outcome of validating a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
	Valid,
	/// Field name to user-facing message, one message per field
	Invalid(BTreeMap<String, String>),
}

impl ValidationResult {
	pub fn is_valid(&self) -> bool {
		matches!(self, ValidationResult::Valid)
	}

	pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
		match self {
			ValidationResult::Valid => None,
			ValidationResult::Invalid(errors) => Some(errors),
		}
	}

	pub fn into_errors(self) -> BTreeMap<String, String> {
		match self {
			ValidationResult::Valid => BTreeMap::new(),
			ValidationResult::Invalid(errors) => errors,
		}
	}
}

/// Validates the fields of a step against the accumulated values.
///
/// Fields of other steps are never looked at, except as inputs to
/// cross-field rules.
///
/// # Examples
///
/// ```
/// use agriform_forms::{FieldDefinition, FormValueMap, PatternValidator, StepSchema, StepValidator};
///
/// let step = StepSchema::new("Address").field(
///     FieldDefinition::text("pincode", "Pincode")
///         .required("Pincode is required")
///         .pattern(PatternValidator::pincode()),
/// );
///
/// let mut values = FormValueMap::new();
/// values.set("pincode", "50001");
///
/// let result = StepValidator::new().validate(&step, &values);
/// assert_eq!(
///     result.errors().unwrap()["pincode"],
///     "Enter a valid 6-digit pincode"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StepValidator {
	today: Option<NaiveDate>,
}

impl StepValidator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fix the date used for age checks
	pub fn with_today(mut self, today: NaiveDate) -> Self {
		self.today = Some(today);
		self
	}

	pub fn today(&self) -> NaiveDate {
		self.today
			.unwrap_or_else(|| chrono::Local::now().date_naive())
	}

	pub fn validate(&self, schema: &StepSchema, values: &FormValueMap) -> ValidationResult {
		let today = self.today();
		let errors: BTreeMap<String, String> = schema
			.fields()
			.iter()
			.filter_map(|field| {
				check_field(field, values, today)
					.err()
					.map(|e| (field.name().to_string(), e.to_string()))
			})
			.collect();

		if errors.is_empty() {
			ValidationResult::Valid
		} else {
			tracing::debug!(
				step = schema.title(),
				fields = ?errors.keys().collect::<Vec<_>>(),
				"Step validation failed"
			);
			ValidationResult::Invalid(errors)
		}
	}

	/// Validate a single field in isolation
	pub fn validate_field(&self, field: &FieldDefinition, values: &FormValueMap) -> Result<(), FieldError> {
		check_field(field, values, self.today())
	}
}

fn check_field(field: &FieldDefinition, values: &FormValueMap, today: NaiveDate) -> Result<(), FieldError> {
	let Some(value) = values.normalized(field.name()) else {
		return match field.rules().iter().find_map(|r| r.requires(values)) {
			Some(message) => Err(FieldError::Required(message.to_string())),
			None => Ok(()),
		};
	};

	field
		.rules()
		.iter()
		.try_for_each(|rule| rule.check(value, values, today))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validators::PatternValidator;
	use rstest::{fixture, rstest};

	#[fixture]
	fn validator() -> StepValidator {
		StepValidator::new().with_today(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
	}

	#[fixture]
	fn contact_step() -> StepSchema {
		StepSchema::new("Contact")
			.field(
				FieldDefinition::text("contactNumber", "Contact Number")
					.required("Contact number is required")
					.pattern(PatternValidator::phone()),
			)
			.field(
				FieldDefinition::text("alternativeNumber", "Alternative Number")
					.pattern(PatternValidator::phone()),
			)
	}

	#[rstest]
	fn test_missing_required_field(validator: StepValidator, contact_step: StepSchema) {
		// Act
		let result = validator.validate(&contact_step, &FormValueMap::new());

		// Assert
		let errors = result.into_errors();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors["contactNumber"], "Contact number is required");
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	fn test_blank_optional_field_skips_pattern(
		validator: StepValidator,
		contact_step: StepSchema,
		#[case] blank: &str,
	) {
		// Arrange
		let mut values = FormValueMap::new();
		values.set("contactNumber", "9876543210");
		values.set("alternativeNumber", blank);

		// Act + Assert
		assert!(validator.validate(&contact_step, &values).is_valid());
	}

	#[rstest]
	fn test_blank_required_field_is_missing(validator: StepValidator, contact_step: StepSchema) {
		let mut values = FormValueMap::new();
		values.set("contactNumber", "  ");

		let errors = validator.validate(&contact_step, &values).into_errors();

		assert_eq!(errors["contactNumber"], "Contact number is required");
	}

	#[rstest]
	fn test_first_failing_rule_wins(validator: StepValidator) {
		// Arrange
		let step = StepSchema::new("Password").field(
			FieldDefinition::password("password", "Password")
				.required("Password is required")
				.min_length(6, "Password must be at least 6 characters")
				.pattern(PatternValidator::new("[A-Z]", "Must contain one uppercase letter").unwrap()),
		);
		let mut values = FormValueMap::new();
		values.set("password", "abc");

		// Act
		let errors = validator.validate(&step, &values).into_errors();

		// Assert
		assert_eq!(errors["password"], "Password must be at least 6 characters");
	}

	#[rstest]
	fn test_fields_outside_step_are_ignored(validator: StepValidator, contact_step: StepSchema) {
		let mut values = FormValueMap::new();
		values.set("contactNumber", "9876543210");
		values.set("pincode", "1");

		assert!(validator.validate(&contact_step, &values).is_valid());
	}

	#[rstest]
	fn test_validate_field_uses_fixed_today(validator: StepValidator) {
		let field = FieldDefinition::date("dateOfBirth", "Date of Birth")
			.required("Date of birth is required")
			.age_between(18, 90);
		let mut values = FormValueMap::new();
		values.set("dateOfBirth", "2008-10-17");

		assert!(validator.validate_field(&field, &values).is_err());

		values.set("dateOfBirth", "2008-10-16");
		assert!(validator.validate_field(&field, &values).is_ok());
	}
}
