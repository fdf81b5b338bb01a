use crate::field::{FieldError, FieldResult};
use chrono::{Datelike, NaiveDate};

const INPUT_FORMATS: &[&str] = &[
	"%Y-%m-%d", // 2025-01-15
	"%d/%m/%Y", // 15/01/2025
	"%d-%m-%Y", // 15-01-2025
];

/// Parse a date entered in one of the accepted formats.
///
/// Years outside 1000..=9999 are rejected to avoid two-digit year ambiguity.
///
/// # Examples
///
/// ```
/// use agriform_forms::fields::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("1990-06-15"), NaiveDate::from_ymd_opt(1990, 6, 15));
/// assert_eq!(parse_date("15/06/1990"), NaiveDate::from_ymd_opt(1990, 6, 15));
/// assert_eq!(parse_date("90-06-15"), None);
/// ```
pub fn parse_date(s: &str) -> Option<NaiveDate> {
	let s = s.trim();
	INPUT_FORMATS.iter().find_map(|format| {
		NaiveDate::parse_from_str(s, format)
			.ok()
			.filter(|date| (1000..=9999).contains(&date.year()))
	})
}

/// Whole years between `dob` and `today`, accurate to the day.
///
/// A birthday that has not yet come round this year does not count. A
/// 29 February birthday is reached on 1 March in non-leap years. Dates of
/// birth in the future give a negative age.
///
/// # Examples
///
/// ```
/// use agriform_forms::fields::age_on;
/// use chrono::NaiveDate;
///
/// let dob = NaiveDate::from_ymd_opt(2000, 10, 17).unwrap();
/// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// assert_eq!(age_on(dob, today), 25);
/// ```
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
	let mut age = today.year() - dob.year();
	if (today.month(), today.day()) < (dob.month(), dob.day()) {
		age -= 1;
	}
	age
}

/// Checks that a date of birth gives an age within an inclusive range
#[derive(Debug, Clone)]
pub struct AgeValidator {
	min: i32,
	max: i32,
	message: Option<String>,
}

impl AgeValidator {
	pub fn new(min: i32, max: i32) -> Self {
		Self {
			min,
			max,
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn min(&self) -> i32 {
		self.min
	}

	pub fn max(&self) -> i32 {
		self.max
	}

	/// Validate a date of birth as entered by the user
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::fields::AgeValidator;
	/// use chrono::NaiveDate;
	///
	/// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
	/// let validator = AgeValidator::new(18, 90);
	///
	/// assert!(validator.validate("1990-01-01", today).is_ok());
	/// assert!(validator.validate("2010-01-01", today).is_err());
	/// assert!(validator.validate("not a date", today).is_err());
	/// ```
	pub fn validate(&self, value: &str, today: NaiveDate) -> FieldResult<()> {
		let dob = parse_date(value)
			.ok_or_else(|| FieldError::Invalid("Enter date as YYYY-MM-DD".to_string()))?;

		let age = age_on(dob, today);
		if (self.min..=self.max).contains(&age) {
			Ok(())
		} else {
			let msg = self.message.clone().unwrap_or_else(|| {
				format!("Age must be between {} and {} years", self.min, self.max)
			});
			Err(FieldError::Validation(msg))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[rstest]
	#[case(ymd(2000, 10, 16), 26)] // birthday today
	#[case(ymd(2000, 10, 17), 25)] // birthday tomorrow
	#[case(ymd(2000, 10, 15), 26)] // birthday yesterday
	#[case(ymd(2000, 11, 1), 25)]
	#[case(ymd(2000, 1, 1), 26)]
	#[case(ymd(2027, 1, 1), -1)]
	fn test_age_is_accurate_to_the_day(#[case] dob: NaiveDate, #[case] expected: i32) {
		assert_eq!(age_on(dob, ymd(2026, 10, 16)), expected);
	}

	#[rstest]
	fn test_leap_day_birthday() {
		let dob = ymd(2004, 2, 29);
		assert_eq!(age_on(dob, ymd(2022, 2, 28)), 17);
		assert_eq!(age_on(dob, ymd(2022, 3, 1)), 18);
		assert_eq!(age_on(dob, ymd(2024, 2, 29)), 20);
	}

	#[rstest]
	#[case("2008-10-16", true)] // turns 18 today
	#[case("2008-10-17", false)] // turns 18 tomorrow
	#[case("1936-10-16", true)] // 90 today
	#[case("1935-10-16", false)] // 91
	fn test_age_bounds_inclusive(#[case] dob: &str, #[case] valid: bool) {
		let validator = AgeValidator::new(18, 90);
		assert_eq!(validator.validate(dob, ymd(2026, 10, 16)).is_ok(), valid);
	}

	#[rstest]
	fn test_naive_year_subtraction_would_differ() {
		// 2026 - 2008 = 18, but the birthday is still a day away
		let result = AgeValidator::new(18, 90).validate("2008-10-17", ymd(2026, 10, 16));

		assert_eq!(
			result.unwrap_err().to_string(),
			"Age must be between 18 and 90 years"
		);
	}

	#[rstest]
	#[case("")]
	#[case("2026-02-30")]
	#[case("16 Oct 2000")]
	fn test_unparseable_dates(#[case] input: &str) {
		let result = AgeValidator::new(18, 90).validate(input, ymd(2026, 10, 16));
		assert!(matches!(result, Err(FieldError::Invalid(_))));
	}
}
