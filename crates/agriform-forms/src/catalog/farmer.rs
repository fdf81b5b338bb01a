use super::UploadLimits;
use super::options::{
	CROP_CATEGORIES, FARMER_DOCUMENT_TYPES, FARMER_EDUCATION, GENDERS, RELATIONS, SALUTATIONS,
	WATER_SOURCES, YES_NO, crop_options,
};
use crate::field::{FieldDefinition, FieldKind};
use crate::fields::{DependentChoiceValidator, FileValidator};
use crate::schema::{EntityKind, SchemaError, SchemaRegistry, StepSchema};
use crate::validators::PatternValidator;

fn categories() -> impl Iterator<Item = &'static str> {
	CROP_CATEGORIES.iter().map(|(c, _)| *c)
}

fn photo(name: &str, label: &str, limits: &UploadLimits) -> FieldDefinition {
	FieldDefinition::new(name, label, FieldKind::Image).file_constraints(
		FileValidator::images()
			.with_max_bytes(limits.max_photo_bytes)
			.with_size_message("Photo is too large"),
	)
}

fn certificate(name: &str, trigger: &str, limits: &UploadLimits) -> FieldDefinition {
	FieldDefinition::file(name, "Soil Test Certificate")
		.required_if(trigger, "Yes", "Soil test certificate is required")
		.file_constraints(
			FileValidator::scanned_documents().with_max_bytes(limits.max_document_bytes),
		)
}

/// Current and proposed crop steps share one layout under a field prefix
fn crop_step(title: &str, prefix: &str, soil_test_required: bool, limits: &UploadLimits) -> StepSchema {
	let field = |suffix: &str| format!("{prefix}{suffix}");
	let category = field("CropCategory");
	let crop = field("Crop");
	let soil_test = if prefix == "current" {
		"soilTest".to_string()
	} else {
		field("SoilTest")
	};
	let certificate_name = format!("{soil_test}Certificate");

	let mut soil = FieldDefinition::select(&soil_test, "Soil Test");
	if soil_test_required {
		soil = soil.required("Soil test selection is required");
	}

	StepSchema::new(title)
		.field(photo(&field("CropPhoto"), "Crop Photo", limits))
		.field(FieldDefinition::text(field("SurveyNumber"), "Survey Number"))
		.field(
			FieldDefinition::new(field("LandHolding"), "Total Land Holding (Acres)", FieldKind::Number)
				.number_range(Some(0.0), None, "Land holding cannot be negative"),
		)
		.field(FieldDefinition::text(field("GeoTag"), "Geo-tag").pattern(PatternValidator::geo_tag()))
		.field(
			FieldDefinition::select(&category, "Crop Category")
				.one_of(categories(), "Select a valid crop category")
				.clears([crop.clone()]),
		)
		.field(
			FieldDefinition::select(&crop, "Crop").dependent_choice(
				DependentChoiceValidator::new(&category, crop_options())
					.with_message("Select a crop from the chosen category"),
			),
		)
		.field(
			FieldDefinition::new(field("NetIncome"), "Net Income (As per Annum)", FieldKind::Number)
				.number_range(Some(0.0), None, "Net income cannot be negative"),
		)
		.field(soil.one_of(YES_NO.iter().copied(), "Select Yes or No"))
		.field(certificate(&certificate_name, &soil_test, limits))
}

pub(super) fn build(limits: &UploadLimits) -> Result<SchemaRegistry, SchemaError> {
	let personal = StepSchema::new("Personal Information")
		.field(photo("photo", "Photo", limits))
		.field(
			FieldDefinition::select("salutation", "Salutation")
				.required("Salutation is required")
				.one_of(SALUTATIONS.iter().copied(), "Select a valid salutation"),
		)
		.field(
			FieldDefinition::text("firstName", "First Name")
				.required("First Name is required")
				.pattern(PatternValidator::person_name().with_message("First Name must be 2-26 letters only")),
		)
		.field(
			FieldDefinition::text("middleName", "Middle Name")
				.required("Middle Name is required")
				.pattern(PatternValidator::middle_name().with_message("Middle Name must contain only letters")),
		)
		.field(
			FieldDefinition::text("lastName", "Last Name")
				.required("Last Name is required")
				.pattern(PatternValidator::person_name().with_message("Last Name must be 2-26 letters only")),
		)
		.field(
			FieldDefinition::select("gender", "Gender")
				.required("Gender is required")
				.one_of(GENDERS.iter().copied(), "Select a valid gender"),
		)
		.field(FieldDefinition::select("nationality", "Nationality").required("Nationality is required"))
		.field(
			FieldDefinition::date("dateOfBirth", "Date of Birth")
				.required("Date of Birth is required")
				.age_between(18, 90),
		)
		.field(
			FieldDefinition::text("fatherName", "Father Name")
				.pattern(PatternValidator::full_name().with_message("Father Name must contain only letters")),
		)
		.field(
			FieldDefinition::new("contactNumber", "Contact Number", FieldKind::Phone)
				.pattern(PatternValidator::phone().with_message("Enter a valid 10-digit contact number")),
		)
		.field(
			FieldDefinition::new("alternativeNumber", "Alternative Number", FieldKind::Phone)
				.pattern(PatternValidator::phone().with_message("Enter a valid 10-digit alternative number")),
		)
		.field(
			FieldDefinition::select("alternativeType", "Alternative Type")
				.one_of(RELATIONS.iter().copied(), "Select a valid relation"),
		);

	let address = StepSchema::new("Address")
		.field(FieldDefinition::select("country", "Country").required("Country is required"))
		.field(FieldDefinition::select("state", "State").required("State is required"))
		.field(FieldDefinition::select("district", "District").required("District is required"))
		.field(FieldDefinition::select("mandal", "Mandal").required("Mandal is required"))
		.field(FieldDefinition::select("village", "Village").required("Village is required"))
		.field(
			FieldDefinition::text("pincode", "Pincode")
				.required("Pincode is required")
				.pattern(PatternValidator::pincode()),
		);

	let professional = StepSchema::new("Professional Information")
		.field(
			FieldDefinition::select("education", "Education")
				.one_of(FARMER_EDUCATION.iter().copied(), "Select a valid education level"),
		)
		.field(
			FieldDefinition::text("experience", "Experience")
				.with_help_text("e.g. 15 Years"),
		);

	let irrigation = StepSchema::new("Irrigation Details")
		.field(
			FieldDefinition::select("currentWaterSource", "Current Water Source")
				.one_of(WATER_SOURCES.iter().copied(), "Select a valid water source"),
		)
		.field(
			FieldDefinition::select("proposedWaterSource", "Proposed Water Source")
				.one_of(WATER_SOURCES.iter().copied(), "Select a valid water source"),
		)
		.field(FieldDefinition::text("borewellDischarge", "Borewell Discharge (LPH)"))
		.field(FieldDefinition::text("summerDischarge", "Summer Discharge"))
		.field(FieldDefinition::text("borewellLocation", "Borewell Location"));

	let bank = StepSchema::new("Other Information")
		.field(FieldDefinition::text("bankName", "Bank Name"))
		.field(FieldDefinition::text("accountNumber", "Account Number").pattern(PatternValidator::account_number()))
		.field(FieldDefinition::text("branchName", "Branch Name"))
		.field(FieldDefinition::text("ifscCode", "IFSC Code").pattern(PatternValidator::ifsc()))
		.field(
			FieldDefinition::file("passbookFile", "Passbook").file_constraints(
				FileValidator::scanned_documents().with_max_bytes(limits.max_photo_bytes),
			),
		);

	let mut documents = StepSchema::new("Documents").field(
		FieldDefinition::select("documentType", "Add Document")
			.required("Document Type is required")
			.one_of(FARMER_DOCUMENT_TYPES.iter().copied(), "Select a valid document type")
			.clears(FARMER_DOCUMENT_TYPES.iter().copied().chain(["documentFile"])),
	);
	for (name, label, message) in [
		("voterId", "ID / Voter Card", "Voter ID is required"),
		("aadharNumber", "Aadhar Number", "Aadhar Number is required"),
		("panNumber", "PAN Number", "PAN Number is required"),
		("ppbNumber", "PPB Number", "PPB Number is required"),
	] {
		let mut field = FieldDefinition::text(name, label).required_if("documentType", name, message);
		match name {
			"aadharNumber" => field = field.pattern(PatternValidator::aadhaar()),
			"panNumber" => field = field.pattern(PatternValidator::pan()),
			_ => {}
		}
		documents = documents.field(field);
	}
	let documents = documents.field(
		FieldDefinition::file("documentFile", "Upload")
			.required("Document file is required")
			.file_constraints(
				FileValidator::scanned_documents()
					.with_max_bytes(limits.max_document_bytes)
					.with_size_message("File too large"),
			),
	);

	SchemaRegistry::builder(EntityKind::Farmer)
		.step(personal)
		.step(address)
		.step(professional)
		.step(crop_step("Current Crop Information", "current", true, limits))
		.step(crop_step("Proposed Crop Information", "proposed", false, limits))
		.step(irrigation)
		.step(bank)
		.step(documents)
		.cascade(&["country", "state", "district", "mandal", "village"])
		.build()
}
