//! Format validators for text fields
//!
//! Preset patterns cover the identifiers collected by the registration forms:
//! phone numbers, postal codes, national ID numbers, tax IDs, bank routing
//! codes and account numbers.

use crate::field::{FieldError, FieldResult};
use regex::Regex;
use std::sync::LazyLock;

// Exactly 10 digits.
static PHONE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{10}$").expect("PHONE_REGEX: invalid regex pattern"));

// Exactly 6 digits.
static PINCODE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{6}$").expect("PINCODE_REGEX: invalid regex pattern"));

// Exactly 12 digits.
static AADHAAR_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{12}$").expect("AADHAAR_REGEX: invalid regex pattern"));

// 5 uppercase letters, 4 digits, 1 uppercase letter.
static PAN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("PAN_REGEX: invalid regex pattern")
});

// 4 uppercase letters, a literal zero, 6 uppercase alphanumerics.
static IFSC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("IFSC_REGEX: invalid regex pattern")
});

static ACCOUNT_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\d{9,18}$").expect("ACCOUNT_NUMBER_REGEX: invalid regex pattern")
});

// Latitude and longitude as decimal degrees separated by a comma.
static GEO_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^-?\d+(\.\d+)?\s*,\s*-?\d+(\.\d+)?$")
		.expect("GEO_TAG_REGEX: invalid regex pattern")
});

static OTP_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{6}$").expect("OTP_REGEX: invalid regex pattern"));

// Something, an @, something, a dot, something. No whitespace anywhere.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// Letters only, 2 to 26 of them.
static PERSON_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z]{2,26}$").expect("PERSON_NAME_REGEX: invalid regex pattern")
});

static MIDDLE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z]{1,26}$").expect("MIDDLE_NAME_REGEX: invalid regex pattern")
});

// Letters and spaces, 2 to 40 characters.
static FULL_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z\s]{2,40}$").expect("FULL_NAME_REGEX: invalid regex pattern")
});

static UPPERCASE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[A-Z]").expect("UPPERCASE_REGEX: invalid regex pattern"));

static DIGIT_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\d").expect("DIGIT_REGEX: invalid regex pattern"));

static SPECIAL_CHAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"[!@#$%^&*]").expect("SPECIAL_CHAR_REGEX: invalid regex pattern")
});

static AT_SIGN_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"@").expect("AT_SIGN_REGEX: invalid regex pattern"));

/// Validates a string against a regular expression.
///
/// # Examples
///
/// ```
/// use agriform_forms::validators::PatternValidator;
///
/// let validator = PatternValidator::pincode();
/// assert!(validator.validate("500001").is_ok());
/// assert!(validator.validate("50001").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PatternValidator {
	regex: Regex,
	message: String,
}

impl PatternValidator {
	/// Compile a custom pattern
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::validators::PatternValidator;
	///
	/// let validator = PatternValidator::new(r"^[A-Za-z]{2,26}$", "Letters only").unwrap();
	/// assert!(validator.validate("Ravi").is_ok());
	/// assert!(validator.validate("R4vi").is_err());
	/// ```
	pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
		Ok(Self {
			regex: Regex::new(pattern)?,
			message: message.into(),
		})
	}

	fn preset(regex: &LazyLock<Regex>, message: &str) -> Self {
		Self {
			regex: Regex::clone(regex),
			message: message.to_string(),
		}
	}

	pub fn phone() -> Self {
		Self::preset(&PHONE_REGEX, "Enter a valid 10-digit phone number")
	}

	pub fn pincode() -> Self {
		Self::preset(&PINCODE_REGEX, "Enter a valid 6-digit pincode")
	}

	pub fn aadhaar() -> Self {
		Self::preset(&AADHAAR_REGEX, "Aadhar must be 12 digits")
	}

	pub fn pan() -> Self {
		Self::preset(&PAN_REGEX, "Enter valid PAN number")
	}

	pub fn ifsc() -> Self {
		Self::preset(&IFSC_REGEX, "Enter valid IFSC code")
	}

	pub fn account_number() -> Self {
		Self::preset(&ACCOUNT_NUMBER_REGEX, "Account Number must be 9-18 digits")
	}

	pub fn geo_tag() -> Self {
		Self::preset(
			&GEO_TAG_REGEX,
			"Enter valid Latitude, Longitude (e.g., 17.123, 78.456)",
		)
	}

	pub fn otp() -> Self {
		Self::preset(&OTP_REGEX, "Enter the 6-digit code")
	}

	pub fn email() -> Self {
		Self::preset(&EMAIL_REGEX, "Enter a valid email address")
	}

	pub fn person_name() -> Self {
		Self::preset(&PERSON_NAME_REGEX, "Must be 2-26 letters only")
	}

	pub fn middle_name() -> Self {
		Self::preset(&MIDDLE_NAME_REGEX, "Must contain only letters")
	}

	pub fn full_name() -> Self {
		Self::preset(&FULL_NAME_REGEX, "Must contain only letters")
	}

	pub fn contains_uppercase() -> Self {
		Self::preset(&UPPERCASE_REGEX, "Must contain at least one uppercase letter")
	}

	pub fn contains_digit() -> Self {
		Self::preset(&DIGIT_REGEX, "Must contain at least one number")
	}

	/// At least one of `!@#$%^&*`
	pub fn contains_special_char() -> Self {
		Self::preset(
			&SPECIAL_CHAR_REGEX,
			"Must include a special character (!@#$%^&*)",
		)
	}

	pub fn contains_at_sign() -> Self {
		Self::preset(&AT_SIGN_REGEX, "Must include an '@'")
	}

	/// Sets a custom error message returned on validation failure.
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::validators::PatternValidator;
	///
	/// let validator = PatternValidator::phone().with_message("Enter a valid 10-digit contact number");
	/// assert_eq!(
	///     validator.validate("12345").unwrap_err().to_string(),
	///     "Enter a valid 10-digit contact number"
	/// );
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}

	pub fn is_match(&self, value: &str) -> bool {
		self.regex.is_match(value)
	}

	pub fn validate(&self, value: &str) -> FieldResult<()> {
		if self.regex.is_match(value) {
			Ok(())
		} else {
			Err(FieldError::Validation(self.message.clone()))
		}
	}
}

/// Validates that a string has at least `min` characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
	min: usize,
	message: Option<String>,
}

impl MinLengthValidator {
	pub fn new(min: usize) -> Self {
		Self { min, message: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn validate(&self, value: &str) -> FieldResult<()> {
		if value.chars().count() >= self.min {
			Ok(())
		} else {
			let msg = self
				.message
				.clone()
				.unwrap_or_else(|| format!("Must be at least {} characters", self.min));
			Err(FieldError::Validation(msg))
		}
	}
}

pub fn is_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}

pub fn is_phone(value: &str) -> bool {
	PHONE_REGEX.is_match(value)
}
