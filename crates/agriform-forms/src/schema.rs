//! Step schemas and the per-entity schema registry

use crate::field::FieldDefinition;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// The entity a registry collects data for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Farmer,
	Employee,
	AdminRole,
	Registration,
	Login,
	ForgotIdentity,
	OtpVerification,
	ChangePassword,
}

impl EntityKind {
	pub const ALL: [EntityKind; 8] = [
		EntityKind::Farmer,
		EntityKind::Employee,
		EntityKind::AdminRole,
		EntityKind::Registration,
		EntityKind::Login,
		EntityKind::ForgotIdentity,
		EntityKind::OtpVerification,
		EntityKind::ChangePassword,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			EntityKind::Farmer => "farmer",
			EntityKind::Employee => "employee",
			EntityKind::AdminRole => "admin_role",
			EntityKind::Registration => "registration",
			EntityKind::Login => "login",
			EntityKind::ForgotIdentity => "forgot_identity",
			EntityKind::OtpVerification => "otp_verification",
			EntityKind::ChangePassword => "change_password",
		}
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors raised while building or querying a registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("Step index {index} is out of range (registry has {count} steps)")]
	OutOfRange { index: usize, count: usize },
	#[error("Field '{0}' is declared more than once")]
	DuplicateField(String),
	#[error("Field '{parent}' lists unknown dependent '{dependent}'")]
	UnknownDependent { parent: String, dependent: String },
	#[error("A registry needs at least one step")]
	NoSteps,
}

/// Ordered field definitions for one wizard step
#[derive(Debug, Clone)]
pub struct StepSchema {
	title: String,
	fields: Vec<FieldDefinition>,
}

impl StepSchema {
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			fields: vec![],
		}
	}

	pub fn field(mut self, field: FieldDefinition) -> Self {
		self.fields.push(field);
		self
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn fields(&self) -> &[FieldDefinition] {
		&self.fields
	}

	pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
		self.fields.iter().find(|f| f.name() == name)
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(FieldDefinition::name)
	}
}

/// Step schemas for one entity kind plus the cascade graph between fields.
///
/// # Examples
///
/// ```
/// use agriform_forms::{EntityKind, FieldDefinition, SchemaRegistry, StepSchema};
///
/// let registry = SchemaRegistry::builder(EntityKind::Farmer)
///     .step(
///         StepSchema::new("Address")
///             .field(FieldDefinition::select("country", "Country"))
///             .field(FieldDefinition::select("state", "State"))
///             .field(FieldDefinition::select("district", "District")),
///     )
///     .cascade(&["country", "state", "district"])
///     .build()
///     .unwrap();
///
/// let dependents = registry.get_dependents("country");
/// assert!(dependents.contains("state"));
/// assert!(dependents.contains("district"));
/// assert!(registry.get_dependents("district").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
	entity: EntityKind,
	steps: Vec<StepSchema>,
	edges: BTreeMap<String, Vec<String>>,
}

impl SchemaRegistry {
	pub fn builder(entity: EntityKind) -> SchemaRegistryBuilder {
		SchemaRegistryBuilder {
			entity,
			steps: vec![],
			cascades: vec![],
		}
	}

	pub fn entity(&self) -> EntityKind {
		self.entity
	}

	pub fn step_count(&self) -> usize {
		self.steps.len()
	}

	pub fn steps(&self) -> &[StepSchema] {
		&self.steps
	}

	pub fn get_schema(&self, index: usize) -> Result<&StepSchema, SchemaError> {
		self.steps.get(index).ok_or(SchemaError::OutOfRange {
			index,
			count: self.steps.len(),
		})
	}

	/// Every field that must be cleared when `name` changes, transitively
	pub fn get_dependents(&self, name: &str) -> BTreeSet<String> {
		let mut found = BTreeSet::new();
		let mut stack = vec![name];

		while let Some(current) = stack.pop() {
			let Some(children) = self.edges.get(current) else {
				continue;
			};
			for child in children {
				if child != name && found.insert(child.clone()) {
					stack.push(child);
				}
			}
		}

		found
	}

	pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
		self.steps.iter().find_map(|s| s.get(name))
	}

	/// Index of the step that declares `name`
	pub fn step_of(&self, name: &str) -> Option<usize> {
		self.steps.iter().position(|s| s.get(name).is_some())
	}
}

pub struct SchemaRegistryBuilder {
	entity: EntityKind,
	steps: Vec<StepSchema>,
	cascades: Vec<Vec<String>>,
}

impl SchemaRegistryBuilder {
	pub fn step(mut self, step: StepSchema) -> Self {
		self.steps.push(step);
		self
	}

	/// Declare a chain of selects where each one depends on the previous
	pub fn cascade(mut self, chain: &[&str]) -> Self {
		self.cascades
			.push(chain.iter().map(|s| s.to_string()).collect());
		self
	}

	pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
		if self.steps.is_empty() {
			return Err(SchemaError::NoSteps);
		}

		let mut names = HashSet::new();
		for field in self.steps.iter().flat_map(|s| s.fields()) {
			if !names.insert(field.name()) {
				return Err(SchemaError::DuplicateField(field.name().to_string()));
			}
		}

		let mut edges: BTreeMap<String, Vec<String>> = BTreeMap::new();
		let mut add_edge = |parent: &str, dependent: &str| -> Result<(), SchemaError> {
			if !names.contains(dependent) {
				return Err(SchemaError::UnknownDependent {
					parent: parent.to_string(),
					dependent: dependent.to_string(),
				});
			}
			let children = edges.entry(parent.to_string()).or_default();
			if !children.iter().any(|c| c == dependent) {
				children.push(dependent.to_string());
			}
			Ok(())
		};

		for field in self.steps.iter().flat_map(|s| s.fields()) {
			for dependent in field.dependents() {
				add_edge(field.name(), dependent)?;
			}
		}
		for chain in &self.cascades {
			for pair in chain.windows(2) {
				add_edge(&pair[0], &pair[1])?;
			}
		}

		Ok(SchemaRegistry {
			entity: self.entity,
			steps: self.steps,
			edges,
		})
	}
}
