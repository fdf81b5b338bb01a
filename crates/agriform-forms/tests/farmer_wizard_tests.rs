//! Farmer wizard tests
//!
//! Drives the built-in farmer registry through the wizard controller

use agriform_forms::{
	FileRef, FormSubmitter, FormValueMap, StepOutcome, StepValidator, SubmissionError,
	SubmissionOperation, SubmissionReceipt, WizardController, WizardError, catalog,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use rstest::{fixture, rstest};

mock! {
	Submitter {}

	#[async_trait]
	impl FormSubmitter for Submitter {
		async fn submit(
			&self,
			values: FormValueMap,
			existing_id: Option<String>,
		) -> Result<SubmissionReceipt, SubmissionError>;
	}
}

#[fixture]
fn validator() -> StepValidator {
	StepValidator::new().with_today(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
}

fn wizard(submitter: MockSubmitter, validator: StepValidator) -> WizardController<MockSubmitter> {
	WizardController::new(catalog::farmer(), submitter).with_validator(validator)
}

fn fill_personal(wizard: &mut WizardController<MockSubmitter>) {
	wizard.set_field("salutation", "Mr.");
	wizard.set_field("firstName", "Ravi");
	wizard.set_field("middleName", "Kumar");
	wizard.set_field("lastName", "Reddy");
	wizard.set_field("gender", "Male");
	wizard.set_field("nationality", "Indian");
	wizard.set_field("dateOfBirth", "1985-04-12");
}

fn fill_address(wizard: &mut WizardController<MockSubmitter>, pincode: &str) {
	wizard.set_field("country", "India");
	wizard.set_field("state", "Telangana");
	wizard.set_field("district", "Warangal");
	wizard.set_field("mandal", "Hanamkonda");
	wizard.set_field("village", "Kazipet");
	wizard.set_field("pincode", pincode);
}

/// Values that satisfy every step before `step`
fn prefilled_before(step: usize) -> FormValueMap {
	let mut values = FormValueMap::new();
	if step > 0 {
		for (name, value) in [
			("salutation", "Mr."),
			("firstName", "Ravi"),
			("middleName", "Kumar"),
			("lastName", "Reddy"),
			("gender", "Male"),
			("nationality", "Indian"),
			("dateOfBirth", "1985-04-12"),
		] {
			values.set(name, value);
		}
	}
	if step > 1 {
		for (name, value) in [
			("country", "India"),
			("state", "Telangana"),
			("district", "Warangal"),
			("mandal", "Hanamkonda"),
			("village", "Kazipet"),
			("pincode", "506001"),
		] {
			values.set(name, value);
		}
	}
	if step > 3 {
		values.set("soilTest", "No");
	}
	values
}

#[rstest]
#[case(0, "firstName")]
#[case(1, "pincode")]
#[case(3, "soilTest")]
#[case(7, "documentType")]
#[tokio::test]
async fn test_next_with_missing_required_fields_keeps_index(
	validator: StepValidator,
	#[case] step: usize,
	#[case] missing: &str,
) {
	// Arrange
	let mut submitter = MockSubmitter::new();
	submitter.expect_submit().times(0);
	let mut wizard = wizard(submitter, validator);
	wizard.edit("f-1", prefilled_before(step));
	wizard.jump_to(step).unwrap();

	// Act
	let result = wizard.next().await;

	// Assert
	let Err(WizardError::StepInvalid { step: failed, errors }) = result else {
		panic!("expected StepInvalid");
	};
	assert_eq!(failed, step);
	assert_eq!(wizard.current_step(), step);
	assert!(errors[missing].contains("required"));
}

#[rstest]
#[case("1985-04-12", true)]
#[case("2008-10-16", true)]
#[case("2008-10-17", false)]
#[case("1936-10-17", true)]
#[case("1935-10-16", false)]
#[tokio::test]
async fn test_age_is_calendar_accurate(
	validator: StepValidator,
	#[case] dob: &str,
	#[case] advances: bool,
) {
	// Arrange
	let mut wizard = wizard(MockSubmitter::new(), validator);
	fill_personal(&mut wizard);
	wizard.set_field("dateOfBirth", dob);

	// Act
	let result = wizard.next().await;

	// Assert
	assert_eq!(result.is_ok(), advances);
	if !advances {
		assert_eq!(
			wizard.error("dateOfBirth"),
			Some("Age must be between 18 and 90 years")
		);
	}
}

#[rstest]
fn test_country_change_clears_address_cascade(validator: StepValidator) {
	// Arrange
	let mut wizard = wizard(MockSubmitter::new(), validator);
	fill_address(&mut wizard, "506001");

	// Act
	wizard.set_field("country", "Nepal");

	// Assert
	for cleared in ["state", "district", "mandal", "village"] {
		assert!(wizard.values().get(cleared).is_none(), "{cleared} should be cleared");
	}
	assert!(wizard.values().get("pincode").is_some());
}

#[rstest]
fn test_district_change_clears_only_descendants(validator: StepValidator) {
	// Arrange
	let mut wizard = wizard(MockSubmitter::new(), validator);
	fill_address(&mut wizard, "506001");

	// Act
	wizard.set_field("district", "Karimnagar");

	// Assert
	assert!(wizard.values().get("mandal").is_none());
	assert!(wizard.values().get("village").is_none());
	assert!(wizard.values().get("state").is_some());
	assert!(wizard.values().get("country").is_some());
}

#[rstest]
#[case(Some("Yes"), false, Some("Soil test certificate is required"))]
#[case(Some("Yes"), true, None)]
#[case(Some("No"), false, None)]
#[case(None, false, None)]
fn test_soil_test_certificate_is_conditional(
	validator: StepValidator,
	#[case] soil_test: Option<&str>,
	#[case] with_certificate: bool,
	#[case] expected: Option<&str>,
) {
	// Arrange
	let registry = catalog::farmer();
	let step = registry.get_schema(3).unwrap();
	let mut values = FormValueMap::new();
	if let Some(answer) = soil_test {
		values.set("soilTest", answer);
	}
	if with_certificate {
		values.set(
			"soilTestCertificate",
			FileRef::new("/tmp/soil.pdf", "soil.pdf", "application/pdf", 2048),
		);
	}

	// Act
	let errors = validator.validate(step, &values).into_errors();

	// Assert
	assert_eq!(errors.get("soilTestCertificate").map(String::as_str), expected);
}

#[rstest]
#[tokio::test]
async fn test_farmer_wizard_end_to_end(validator: StepValidator) {
	// Arrange
	let mut submitter = MockSubmitter::new();
	submitter
		.expect_submit()
		.withf(|values, existing_id| {
			existing_id.is_none()
				&& values.get("firstName") == Some(&"Ravi".into())
				&& values.get("pincode") == Some(&"506001".into())
				&& values.get("soilTest") == Some(&"No".into())
				&& values.get("ifscCode") == Some(&"SBIN0001234".into())
				&& values.get("aadharNumber") == Some(&"123412341234".into())
				&& values.files().count() == 1
				&& values.len() == 19
		})
		.times(1)
		.returning(|values, _| {
			Ok(SubmissionReceipt::new(
				SubmissionOperation::Create,
				serde_json::json!({"id": "f-100", "firstName": values.get("firstName").map(|v| v.to_text().into_owned())}),
			))
		});
	let mut wizard = wizard(submitter, validator);

	// Act + Assert: personal information
	fill_personal(&mut wizard);
	assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 1 });

	// Address with a 5-digit postal code is rejected
	fill_address(&mut wizard, "50600");
	let result = wizard.next().await;
	assert!(matches!(result, Err(WizardError::StepInvalid { step: 1, .. })));
	assert_eq!(wizard.current_step(), 1);
	assert!(wizard.error("pincode").unwrap().contains("6-digit"));

	wizard.set_field("pincode", "506001");
	assert!(wizard.error("pincode").is_none());
	assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 2 });

	// Professional information is optional
	assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 3 });

	wizard.set_field("soilTest", "No");
	assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 4 });
	assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 5 });
	assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 6 });

	wizard.set_field("accountNumber", "123456789012");
	wizard.set_field("ifscCode", "SBIN0001234");
	assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 7 });
	assert!(wizard.is_last_step());

	wizard.set_field("documentType", "aadharNumber");
	wizard.set_field("aadharNumber", "123412341234");
	wizard.set_field(
		"documentFile",
		FileRef::new("/tmp/aadhar.pdf", "aadhar.pdf", "application/pdf", 4096),
	);
	let outcome = wizard.next().await.unwrap();

	// Assert
	let StepOutcome::Submitted(receipt) = outcome else {
		panic!("expected submission");
	};
	assert_eq!(receipt.record_id.as_deref(), Some("f-100"));
	assert_eq!(wizard.current_step(), 0);
	assert!(wizard.values().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_document_type_change_clears_numbers(validator: StepValidator) {
	// Arrange
	let mut wizard = wizard(MockSubmitter::new(), validator);
	wizard.set_field("documentType", "panNumber");
	wizard.set_field("panNumber", "ABCDE1234F");

	// Act
	wizard.set_field("documentType", "voterId");

	// Assert
	assert!(wizard.values().get("panNumber").is_none());
	assert_eq!(wizard.values().get("documentType"), Some(&"voterId".into()));
}
