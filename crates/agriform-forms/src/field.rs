//! Field definitions and field-level errors

use crate::fields::{AgeValidator, ChoiceValidator, DependentChoiceValidator, FileValidator};
use crate::rules::{CustomRule, Rule};
use crate::validators::{MinLengthValidator, PatternValidator};
use crate::value::{FieldValue, FormValueMap};
use serde::Serialize;

/// Error raised when a single field fails validation.
///
/// The display text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("{0}")]
	Required(String),
	#[error("{0}")]
	Invalid(String),
	#[error("{0}")]
	Validation(String),
}

impl FieldError {
	pub fn required(message: Option<&str>) -> Self {
		FieldError::Required(message.unwrap_or("This field is required").to_string())
	}

	pub fn message(&self) -> &str {
		match self {
			FieldError::Required(m) | FieldError::Invalid(m) | FieldError::Validation(m) => m,
		}
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Presentation hint for the control that renders a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	Text,
	Email,
	Phone,
	Password,
	Number,
	Date,
	Select,
	MultiSelect,
	File,
	Image,
}

/// Declarative definition of one form field.
///
/// # Examples
///
/// ```
/// use agriform_forms::{FieldDefinition, PatternValidator};
///
/// let field = FieldDefinition::text("pincode", "Pincode")
///     .required("Pincode is required")
///     .pattern(PatternValidator::pincode());
///
/// assert!(field.is_required());
/// assert_eq!(field.rules().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FieldDefinition {
	name: String,
	label: String,
	kind: FieldKind,
	help_text: Option<String>,
	rules: Vec<Rule>,
	dependents: Vec<String>,
}

impl FieldDefinition {
	pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			label: label.into(),
			kind,
			help_text: None,
			rules: vec![],
			dependents: vec![],
		}
	}

	pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Text)
	}

	pub fn select(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Select)
	}

	pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Date)
	}

	pub fn file(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::File)
	}

	pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Password)
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn rule(mut self, rule: Rule) -> Self {
		self.rules.push(rule);
		self
	}

	pub fn required(self, message: impl Into<String>) -> Self {
		self.rule(Rule::Required {
			message: message.into(),
		})
	}

	pub fn pattern(self, validator: PatternValidator) -> Self {
		self.rule(Rule::Pattern(validator))
	}

	pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
		self.rule(Rule::MinLength(MinLengthValidator::new(min).with_message(message)))
	}

	pub fn number_range(self, min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
		self.rule(Rule::NumberRange {
			min,
			max,
			message: message.into(),
		})
	}

	/// Require the date of birth held by this field to give an age in `min..=max`
	pub fn age_between(self, min: i32, max: i32) -> Self {
		self.rule(Rule::AgeRange(AgeValidator::new(min, max)))
	}

	pub fn equals_field(self, other: impl Into<String>, message: impl Into<String>) -> Self {
		self.rule(Rule::EqualsField {
			other: other.into(),
			message: message.into(),
		})
	}

	/// Make the field required once `trigger` holds `equals`
	pub fn required_if(
		self,
		trigger: impl Into<String>,
		equals: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		self.rule(Rule::RequiredIf {
			trigger: trigger.into(),
			equals: equals.into(),
			message: message.into(),
		})
	}

	pub fn file_constraints(self, validator: FileValidator) -> Self {
		self.rule(Rule::File(validator))
	}

	pub fn one_of<I, S>(self, choices: I, message: impl Into<String>) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.rule(Rule::OneOf(ChoiceValidator::new(choices).with_message(message)))
	}

	pub fn dependent_choice(self, validator: DependentChoiceValidator) -> Self {
		self.rule(Rule::DependentChoice(validator))
	}

	pub fn custom<F>(self, name: impl Into<String>, check: F) -> Self
	where
		F: Fn(&FieldValue, &FormValueMap) -> FieldResult<()> + Send + Sync + 'static,
	{
		self.rule(Rule::Custom(CustomRule::new(name, check)))
	}

	/// Fields whose stored values are cleared whenever this field changes
	pub fn clears<I, S>(mut self, dependents: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.dependents
			.extend(dependents.into_iter().map(Into::into));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn dependents(&self) -> &[String] {
		&self.dependents
	}

	/// Unconditionally required (conditional requirements are not counted)
	pub fn is_required(&self) -> bool {
		self.rules
			.iter()
			.any(|rule| matches!(rule, Rule::Required { .. }))
	}

	/// Fixed choices offered by this field, if any
	pub fn choices(&self) -> Option<&[String]> {
		self.rules.iter().find_map(|rule| match rule {
			Rule::OneOf(v) => Some(v.choices()),
			_ => None,
		})
	}

	/// Choices offered for the current parent value of a dependent select
	pub fn choices_for<'a>(&'a self, values: &FormValueMap) -> Option<&'a [String]> {
		self.rules.iter().find_map(|rule| match rule {
			Rule::OneOf(v) => Some(v.choices()),
			Rule::DependentChoice(v) => v.options_for(values),
			_ => None,
		})
	}
}
