use super::UploadLimits;
use super::options::{
	EMPLOYEE_DOCUMENT_TYPES, EMPLOYEE_EDUCATION, GENDERS, PORTAL_ROLES, PORTAL_STATUSES,
	RELATION_PREFIXES, RELATIONS, SALUTATIONS,
};
use crate::field::{FieldDefinition, FieldKind};
use crate::fields::FileValidator;
use crate::schema::{EntityKind, SchemaError, SchemaRegistry, StepSchema};
use crate::validators::PatternValidator;

pub(super) fn build(limits: &UploadLimits) -> Result<SchemaRegistry, SchemaError> {
	let details = StepSchema::new("Employee Details")
		.field(
			FieldDefinition::new("photo", "Photo", FieldKind::Image)
				.file_constraints(FileValidator::images().with_max_bytes(limits.max_photo_bytes)),
		)
		.field(
			FieldDefinition::select("salutation", "Salutation")
				.required("Salutation is required")
				.one_of(SALUTATIONS.iter().copied(), "Select a valid salutation"),
		)
		.field(FieldDefinition::text("firstName", "First Name").required("First Name is required"))
		.field(FieldDefinition::text("middleName", "Middle Name").required("Middle Name is required"))
		.field(FieldDefinition::text("lastName", "Last Name").required("Last Name is required"))
		.field(
			FieldDefinition::select("gender", "Gender")
				.required("Gender is required")
				.one_of(GENDERS.iter().copied(), "Select a valid gender"),
		)
		.field(FieldDefinition::select("nationality", "Nationality").required("Nationality is required"))
		.field(
			FieldDefinition::date("dob", "DOB")
				.required("Date of Birth is required")
				.age_between(18, 90),
		);

	let contact = StepSchema::new("Contact Details")
		.field(
			FieldDefinition::new("contactNumber", "Contact Number", FieldKind::Phone)
				.required("Contact Number is required")
				.pattern(PatternValidator::phone().with_message("Enter a valid 10-digit number")),
		)
		.field(
			FieldDefinition::new("email", "Email", FieldKind::Email)
				.required("Email is required")
				.pattern(PatternValidator::email().with_message("Invalid email address")),
		);

	let other = StepSchema::new("Other Details")
		.field(
			FieldDefinition::select("relation", "Relation")
				.one_of(RELATION_PREFIXES.iter().copied(), "Select D/O, S/O or W/O"),
		)
		.field(FieldDefinition::text("fatherName", "Father Name"))
		.field(
			FieldDefinition::new("altNumber", "Alternative Number", FieldKind::Phone)
				.pattern(PatternValidator::phone()),
		)
		.field(
			FieldDefinition::select("alternativeType", "Alternative Type")
				.one_of(RELATIONS.iter().copied(), "Select a valid relation"),
		);

	let address = StepSchema::new("Address")
		.field(FieldDefinition::select("address.country", "Country").required("Country is required"))
		.field(FieldDefinition::select("address.state", "State").required("State is required"))
		.field(FieldDefinition::select("address.district", "District").required("District is required"))
		.field(FieldDefinition::select("address.block", "Block (mandal)").required("Block (mandal) is required"))
		.field(FieldDefinition::select("address.village", "Village").required("Village is required"))
		.field(
			FieldDefinition::text("address.zipcode", "Zipcode")
				.required("Zipcode is required")
				.pattern(PatternValidator::pincode().with_message("Zipcode must be 6 digits")),
		);

	let professional = StepSchema::new("Professional Details")
		.field(
			FieldDefinition::select("education", "Education")
				.required("Please select education details")
				.one_of(EMPLOYEE_EDUCATION.iter().copied(), "Select a valid education level"),
		)
		.field(FieldDefinition::text("experience", "Experience").required("Please enter experience"));

	let bank = StepSchema::new("Bank Details")
		.field(FieldDefinition::text("bank.bankName", "Bank Name"))
		.field(FieldDefinition::text("bank.accountNumber", "Account Number").pattern(PatternValidator::account_number()))
		.field(FieldDefinition::text("bank.branchName", "Branch Name"))
		.field(FieldDefinition::text("bank.ifscCode", "IFSC Code").pattern(PatternValidator::ifsc()))
		.field(
			FieldDefinition::file("bank.passbook", "Passbook").file_constraints(
				FileValidator::scanned_documents().with_max_bytes(limits.max_photo_bytes),
			),
		);

	let documents = StepSchema::new("Documents")
		.field(
			FieldDefinition::select("documents.documentType", "Add Document")
				.one_of(EMPLOYEE_DOCUMENT_TYPES.iter().copied(), "Select a valid document type")
				.clears(["documents.file"]),
		)
		.field(
			FieldDefinition::file("documents.file", "Upload").file_constraints(
				FileValidator::scanned_documents().with_max_bytes(limits.max_document_bytes),
			),
		);

	let portal = StepSchema::new("Portal Access")
		.field(
			FieldDefinition::select("portalAccess.role", "Role/Designation")
				.required("Please select a role")
				.one_of(PORTAL_ROLES.iter().copied(), "Select a valid role"),
		)
		.field(
			FieldDefinition::select("portalAccess.status", "Access")
				.required("Please select an access status")
				.one_of(PORTAL_STATUSES.iter().copied(), "Select a valid access status"),
		);

	SchemaRegistry::builder(EntityKind::Employee)
		.step(details)
		.step(contact)
		.step(other)
		.step(address)
		.step(professional)
		.step(bank)
		.step(documents)
		.step(portal)
		.cascade(&[
			"address.country",
			"address.state",
			"address.district",
			"address.block",
			"address.village",
		])
		.build()
}
