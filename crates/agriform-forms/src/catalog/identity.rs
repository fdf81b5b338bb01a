use super::options::GENDERS;
use crate::field::{FieldDefinition, FieldError, FieldKind};
use crate::schema::{EntityKind, SchemaError, SchemaRegistry, StepSchema};
use crate::validators::{PatternValidator, is_email, is_phone};

fn single_step(entity: EntityKind, step: StepSchema) -> Result<SchemaRegistry, SchemaError> {
	SchemaRegistry::builder(entity).step(step).build()
}

pub(super) fn registration() -> Result<SchemaRegistry, SchemaError> {
	let step = StepSchema::new("Registration")
		.field(FieldDefinition::text("firstName", "First Name").required("First Name is required"))
		.field(FieldDefinition::text("lastName", "Last Name").required("Last Name is required"))
		.field(
			FieldDefinition::date("dateOfBirth", "Date of Birth")
				.required("Date of Birth is required")
				.age_between(18, 90),
		)
		.field(
			FieldDefinition::select("gender", "Gender")
				.required("Gender is required")
				.one_of(GENDERS.iter().copied(), "Select a valid gender"),
		)
		.field(FieldDefinition::select("country", "Country").required("Country is required"))
		.field(FieldDefinition::select("state", "State").required("State is required"))
		.field(
			FieldDefinition::text("pinCode", "Pin Code")
				.required("Pin Code is required")
				.pattern(PatternValidator::pincode().with_message("Enter a valid 6-digit Pin Code")),
		)
		.field(FieldDefinition::text("timeZone", "Time Zone").required("Time Zone is required"))
		.field(
			FieldDefinition::new("email", "Email", FieldKind::Email)
				.required("Email is required")
				.pattern(
					PatternValidator::email().with_message("Email must include '@' and '.' and be valid"),
				),
		)
		.field(
			FieldDefinition::new("phoneNumber", "Phone Number", FieldKind::Phone)
				.required("Phone number is required")
				.pattern(PatternValidator::phone()),
		)
		.field(
			FieldDefinition::password("password", "Password")
				.required("Password is required")
				.min_length(6, "Password must be at least 6 characters")
				.pattern(PatternValidator::contains_uppercase())
				.pattern(PatternValidator::contains_digit())
				.pattern(PatternValidator::contains_at_sign()),
		)
		.field(
			FieldDefinition::password("confirmPassword", "Confirm Password")
				.required("Confirm Password is required")
				.equals_field("password", "Passwords must match"),
		);

	SchemaRegistry::builder(EntityKind::Registration)
		.step(step)
		.cascade(&["country", "state"])
		.build()
}

pub(super) fn login() -> Result<SchemaRegistry, SchemaError> {
	single_step(
		EntityKind::Login,
		StepSchema::new("Log In")
			.field(
				FieldDefinition::new("userName", "Email", FieldKind::Email)
					.required("Email is required")
					.pattern(
						PatternValidator::email().with_message("Email must include '@' and '.' and be valid"),
					),
			)
			.field(
				FieldDefinition::password("password", "Password")
					.required("Password is required")
					.min_length(6, "Password must be at least 6 characters"),
			),
	)
}

pub(super) fn forgot_identity() -> Result<SchemaRegistry, SchemaError> {
	single_step(
		EntityKind::ForgotIdentity,
		StepSchema::new("Forgot Password / User ID").field(
			FieldDefinition::text("emailOrPhone", "Email / Phone / ID")
				.required("Email / Phone / ID is required")
				.custom("email_phone_or_id", |value, _| {
					let text = value.to_text();
					let text = text.trim();
					if is_email(text) || is_phone(text) || text.chars().count() >= 6 {
						Ok(())
					} else {
						Err(FieldError::Validation(
							"Enter a valid Email (with '@' and '.'), 10-digit Phone number, or ID (min 6 characters)"
								.to_string(),
						))
					}
				}),
		),
	)
}

pub(super) fn otp_verification() -> Result<SchemaRegistry, SchemaError> {
	single_step(
		EntityKind::OtpVerification,
		StepSchema::new("OTP Verification").field(
			FieldDefinition::text("otp", "Enter OTP")
				.required("Please enter a valid 6-digit OTP")
				.pattern(PatternValidator::otp().with_message("Please enter a valid 6-digit OTP")),
		),
	)
}

pub(super) fn change_password() -> Result<SchemaRegistry, SchemaError> {
	single_step(
		EntityKind::ChangePassword,
		StepSchema::new("Change Password")
			.field(
				FieldDefinition::password("password", "New Password")
					.required("Password is required")
					.min_length(8, "Must be at least 8 characters")
					.pattern(PatternValidator::contains_uppercase().with_message("Must contain an uppercase letter"))
					.pattern(PatternValidator::contains_special_char()),
			)
			.field(
				FieldDefinition::password("confirmPassword", "Confirm Password")
					.required("Please confirm your password")
					.equals_field("password", "Passwords must match"),
			),
	)
}
