use super::options::{ADMIN_ACCESS, ADMIN_MODULES, ADMIN_ROLES};
use crate::field::{FieldDefinition, FieldKind};
use crate::schema::{EntityKind, SchemaError, SchemaRegistry, StepSchema};

pub(super) fn build() -> Result<SchemaRegistry, SchemaError> {
	SchemaRegistry::builder(EntityKind::AdminRole)
		.step(
			StepSchema::new("Role")
				.field(
					FieldDefinition::select("role", "Role Name")
						.required("Role is required")
						.one_of(ADMIN_ROLES.iter().copied(), "Select a valid role"),
				)
				.field(FieldDefinition::text("description", "Description").required("Description is required"))
				.field(
					FieldDefinition::new("modules", "Select Modules", FieldKind::MultiSelect)
						.required("Modules are required")
						.one_of(ADMIN_MODULES.iter().copied(), "Select valid modules"),
				)
				.field(
					FieldDefinition::new("access", "Define Access", FieldKind::MultiSelect)
						.required("Access is required")
						.one_of(ADMIN_ACCESS.iter().copied(), "Select valid access levels"),
				),
		)
		.build()
}
