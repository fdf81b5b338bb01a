use crate::schema::{SchemaError, SchemaRegistry, StepSchema};
use crate::step_validator::{StepValidator, ValidationResult};
use crate::submission::{FormSubmitter, SubmissionError, SubmissionReceipt};
use crate::value::{FieldValue, FormValueMap};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What happens to the wizard state after a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
	/// Back to step 0 with an empty value map
	#[default]
	Reset,
	/// Keep step, values and the returned record id
	Retain,
}

/// Result of a successful `next()`
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
	Advanced { step: usize },
	Submitted(SubmissionReceipt),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
	#[error("Step {step} has {} invalid field(s)", .errors.len())]
	StepInvalid {
		step: usize,
		errors: BTreeMap<String, String>,
	},
	#[error(transparent)]
	OutOfRange(#[from] SchemaError),
	#[error(transparent)]
	Submission(#[from] SubmissionError),
}

/// Drives one wizard session over a schema registry.
///
/// The controller owns the step index, the accumulated values and the
/// per-field errors. Forward movement is gated on step validation; the final
/// `next()` hands the values to the submitter.
///
/// # Examples
///
/// ```
/// use agriform_forms::{
///     EntityKind, FieldDefinition, FormSubmitter, FormValueMap, SchemaRegistry, StepSchema,
///     SubmissionError, SubmissionOperation, SubmissionReceipt, WizardController,
/// };
/// use std::sync::Arc;
///
/// struct Echo;
///
/// #[async_trait::async_trait]
/// impl FormSubmitter for Echo {
///     async fn submit(
///         &self,
///         values: FormValueMap,
///         _existing_id: Option<String>,
///     ) -> Result<SubmissionReceipt, SubmissionError> {
///         Ok(SubmissionReceipt::new(SubmissionOperation::Create, values.to_json()))
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() {
/// let registry = SchemaRegistry::builder(EntityKind::AdminRole)
///     .step(StepSchema::new("Role").field(FieldDefinition::text("role", "Role").required("Role is required")))
///     .build()
///     .unwrap();
///
/// let mut wizard = WizardController::new(Arc::new(registry), Echo);
/// assert!(wizard.next().await.is_err());
///
/// wizard.set_field("role", "manager");
/// assert!(wizard.next().await.is_ok());
/// assert!(wizard.values().is_empty());
/// # }
/// ```
pub struct WizardController<S> {
	registry: Arc<SchemaRegistry>,
	validator: StepValidator,
	submitter: S,
	current_step: usize,
	values: FormValueMap,
	errors: BTreeMap<String, String>,
	record_id: Option<String>,
	completion: CompletionPolicy,
}

impl<S: FormSubmitter> WizardController<S> {
	pub fn new(registry: Arc<SchemaRegistry>, submitter: S) -> Self {
		Self {
			registry,
			validator: StepValidator::new(),
			submitter,
			current_step: 0,
			values: FormValueMap::new(),
			errors: BTreeMap::new(),
			record_id: None,
			completion: CompletionPolicy::default(),
		}
	}

	pub fn with_validator(mut self, validator: StepValidator) -> Self {
		self.validator = validator;
		self
	}

	pub fn with_completion_policy(mut self, completion: CompletionPolicy) -> Self {
		self.completion = completion;
		self
	}

	/// Start an update session from a stored record
	pub fn edit(&mut self, record_id: impl Into<String>, values: FormValueMap) {
		let record_id = record_id.into();
		tracing::info!(entity = %self.registry.entity(), record_id = %record_id, "Editing record");
		self.current_step = 0;
		self.values = values;
		self.errors.clear();
		self.record_id = Some(record_id);
	}

	pub fn registry(&self) -> &SchemaRegistry {
		&self.registry
	}

	pub fn current_step(&self) -> usize {
		self.current_step
	}

	pub fn current_schema(&self) -> &StepSchema {
		&self.registry.steps()[self.current_step]
	}

	pub fn values(&self) -> &FormValueMap {
		&self.values
	}

	pub fn errors(&self) -> &BTreeMap<String, String> {
		&self.errors
	}

	pub fn error(&self, name: &str) -> Option<&str> {
		self.errors.get(name).map(String::as_str)
	}

	pub fn record_id(&self) -> Option<&str> {
		self.record_id.as_deref()
	}

	pub fn total_steps(&self) -> usize {
		self.registry.step_count()
	}

	pub fn is_first_step(&self) -> bool {
		self.current_step == 0
	}

	pub fn is_last_step(&self) -> bool {
		self.current_step + 1 >= self.registry.step_count()
	}

	pub fn progress_percentage(&self) -> f32 {
		((self.current_step + 1) as f32 / self.registry.step_count() as f32) * 100.0
	}

	/// Store a value and clear every field that depends on it.
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::{catalog, FormSubmitter, WizardController};
	/// # use agriform_forms::{FormValueMap, SubmissionError, SubmissionReceipt};
	/// # struct Noop;
	/// # #[async_trait::async_trait]
	/// # impl FormSubmitter for Noop {
	/// #     async fn submit(&self, _: FormValueMap, _: Option<String>) -> Result<SubmissionReceipt, SubmissionError> {
	/// #         unreachable!()
	/// #     }
	/// # }
	///
	/// let mut wizard = WizardController::new(catalog::farmer(), Noop);
	/// wizard.set_field("country", "India");
	/// wizard.set_field("state", "Telangana");
	/// wizard.set_field("country", "Nepal");
	/// assert!(wizard.values().get("state").is_none());
	/// ```
	pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
		self.values.set(name, value);
		self.errors.remove(name);

		for dependent in self.registry.get_dependents(name) {
			self.values.remove(&dependent);
			self.errors.remove(&dependent);
		}
	}

	fn validate_step(&self, index: usize) -> ValidationResult {
		self.validator
			.validate(&self.registry.steps()[index], &self.values)
	}

	fn fail_at(&mut self, step: usize, errors: BTreeMap<String, String>) -> WizardError {
		self.current_step = step;
		self.errors = errors.clone();
		WizardError::StepInvalid { step, errors }
	}

	/// Validate the current step and advance, or submit on the last step
	pub async fn next(&mut self) -> Result<StepOutcome, WizardError> {
		if self.is_last_step() {
			return self.submit().await.map(StepOutcome::Submitted);
		}

		match self.validate_step(self.current_step) {
			ValidationResult::Valid => {
				self.current_step += 1;
				self.errors.clear();
				tracing::debug!(step = self.current_step, "Advanced to step");
				Ok(StepOutcome::Advanced {
					step: self.current_step,
				})
			}
			ValidationResult::Invalid(errors) => Err(self.fail_at(self.current_step, errors)),
		}
	}

	/// Step back without validation, saturating at the first step
	pub fn previous(&mut self) -> usize {
		self.current_step = self.current_step.saturating_sub(1);
		self.errors.clear();
		self.current_step
	}

	/// Move to `index`.
	///
	/// Moving backward is always allowed. Moving forward validates every step
	/// from the current one up to the target and stops at the first invalid
	/// step, which becomes current.
	pub fn jump_to(&mut self, index: usize) -> Result<(), WizardError> {
		self.registry.get_schema(index)?;

		if index > self.current_step {
			for step in self.current_step..index {
				if let ValidationResult::Invalid(errors) = self.validate_step(step) {
					return Err(self.fail_at(step, errors));
				}
			}
		}

		tracing::debug!(from = self.current_step, to = index, "Jumped to step");
		self.current_step = index;
		self.errors.clear();
		Ok(())
	}

	/// Validate every step and hand the values to the submitter.
	///
	/// On failure the step index and values are left as they were; only the
	/// error map changes when a step is invalid.
	pub async fn submit(&mut self) -> Result<SubmissionReceipt, WizardError> {
		for step in 0..self.registry.step_count() {
			if let ValidationResult::Invalid(errors) = self.validate_step(step) {
				return Err(self.fail_at(step, errors));
			}
		}

		let receipt = self
			.submitter
			.submit(self.values.clone(), self.record_id.clone())
			.await
			.inspect_err(|e| {
				tracing::warn!(entity = %self.registry.entity(), error = %e, "Submission failed");
			})?;

		tracing::info!(
			entity = %self.registry.entity(),
			operation = ?receipt.operation,
			"Submission accepted"
		);

		match self.completion {
			CompletionPolicy::Reset => self.reset(),
			CompletionPolicy::Retain => {
				self.errors.clear();
				if receipt.record_id.is_some() {
					self.record_id.clone_from(&receipt.record_id);
				}
			}
		}

		Ok(receipt)
	}

	/// Back to the initial state: step 0, no values, no record
	pub fn reset(&mut self) {
		self.current_step = 0;
		self.values.clear();
		self.errors.clear();
		self.record_id = None;
	}
}
