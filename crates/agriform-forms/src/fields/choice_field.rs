use crate::field::{FieldError, FieldResult};
use crate::value::{FieldValue, FormValueMap};
use std::collections::BTreeMap;

/// Restricts a value (or every item of a multi-select) to a fixed set
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
	choices: Vec<String>,
	message: Option<String>,
}

impl ChoiceValidator {
	pub fn new<I, S>(choices: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			choices: choices.into_iter().map(Into::into).collect(),
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn choices(&self) -> &[String] {
		&self.choices
	}

	fn error(&self) -> FieldError {
		FieldError::Validation(
			self.message
				.clone()
				.unwrap_or_else(|| "Select a valid choice".to_string()),
		)
	}

	/// # Examples
	///
	/// ```
	/// use agriform_forms::{FieldValue, fields::ChoiceValidator};
	///
	/// let validator = ChoiceValidator::new(["read", "write", "admin"]);
	/// assert!(validator.validate(&FieldValue::from("read")).is_ok());
	/// assert!(validator.validate(&FieldValue::from(vec!["read".to_string(), "admin".to_string()])).is_ok());
	/// assert!(validator.validate(&FieldValue::from("delete")).is_err());
	/// ```
	pub fn validate(&self, value: &FieldValue) -> FieldResult<()> {
		let ok = match value {
			FieldValue::List(items) => items.iter().all(|item| self.choices.contains(item)),
			other => {
				let text = other.to_text();
				self.choices.iter().any(|c| *c == text)
			}
		};

		if ok { Ok(()) } else { Err(self.error()) }
	}
}

/// Restricts a value to the options offered for the current value of a
/// parent field (crop category → crop).
#[derive(Debug, Clone)]
pub struct DependentChoiceValidator {
	parent: String,
	options: BTreeMap<String, Vec<String>>,
	message: Option<String>,
}

impl DependentChoiceValidator {
	pub fn new(parent: impl Into<String>, options: BTreeMap<String, Vec<String>>) -> Self {
		Self {
			parent: parent.into(),
			options,
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn parent(&self) -> &str {
		&self.parent
	}

	/// Options available for the parent value currently held in `values`
	pub fn options_for(&self, values: &FormValueMap) -> Option<&[String]> {
		let parent = values.normalized(&self.parent)?;
		self.options
			.get(parent.to_text().as_ref())
			.map(Vec::as_slice)
	}

	pub fn validate(&self, value: &FieldValue, values: &FormValueMap) -> FieldResult<()> {
		let Some(options) = self.options_for(values) else {
			return Err(FieldError::Invalid(format!(
				"Select a valid {} first",
				self.parent
			)));
		};

		let text = value.to_text();
		if options.iter().any(|o| *o == text) {
			Ok(())
		} else {
			Err(FieldError::Validation(
				self.message
					.clone()
					.unwrap_or_else(|| "Select a valid choice".to_string()),
			))
		}
	}
}
