//! Built-in registries for the farmer, employee, admin and identity forms
//!
//! Each registry is built once and shared. Use [`farmer_with_limits`] or
//! [`employee_with_limits`] when upload limits come from configuration.

mod admin_role;
mod employee;
mod farmer;
mod identity;
pub mod options;

use crate::fields::FileValidator;
use crate::schema::{EntityKind, SchemaError, SchemaRegistry};
use std::sync::{Arc, LazyLock};

/// Upload size limits applied to photo and document fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
	/// Photos and passbook scans
	pub max_photo_bytes: u64,
	/// Certificates and identity documents
	pub max_document_bytes: u64,
}

impl Default for UploadLimits {
	fn default() -> Self {
		Self {
			max_photo_bytes: 5 * FileValidator::MEGABYTE,
			max_document_bytes: 10 * FileValidator::MEGABYTE,
		}
	}
}

static FARMER: LazyLock<Arc<SchemaRegistry>> = LazyLock::new(|| {
	Arc::new(farmer::build(&UploadLimits::default()).expect("FARMER: invalid registry"))
});

static EMPLOYEE: LazyLock<Arc<SchemaRegistry>> = LazyLock::new(|| {
	Arc::new(employee::build(&UploadLimits::default()).expect("EMPLOYEE: invalid registry"))
});

static ADMIN_ROLE: LazyLock<Arc<SchemaRegistry>> =
	LazyLock::new(|| Arc::new(admin_role::build().expect("ADMIN_ROLE: invalid registry")));

static REGISTRATION: LazyLock<Arc<SchemaRegistry>> =
	LazyLock::new(|| Arc::new(identity::registration().expect("REGISTRATION: invalid registry")));

static LOGIN: LazyLock<Arc<SchemaRegistry>> =
	LazyLock::new(|| Arc::new(identity::login().expect("LOGIN: invalid registry")));

static FORGOT_IDENTITY: LazyLock<Arc<SchemaRegistry>> = LazyLock::new(|| {
	Arc::new(identity::forgot_identity().expect("FORGOT_IDENTITY: invalid registry"))
});

static OTP_VERIFICATION: LazyLock<Arc<SchemaRegistry>> = LazyLock::new(|| {
	Arc::new(identity::otp_verification().expect("OTP_VERIFICATION: invalid registry"))
});

static CHANGE_PASSWORD: LazyLock<Arc<SchemaRegistry>> = LazyLock::new(|| {
	Arc::new(identity::change_password().expect("CHANGE_PASSWORD: invalid registry"))
});

/// The eight-step farmer registration form
///
/// # Examples
///
/// ```
/// use agriform_forms::catalog;
///
/// let registry = catalog::farmer();
/// assert_eq!(registry.step_count(), 8);
/// assert_eq!(registry.get_schema(1).unwrap().title(), "Address");
/// ```
pub fn farmer() -> Arc<SchemaRegistry> {
	Arc::clone(&FARMER)
}

pub fn farmer_with_limits(limits: &UploadLimits) -> Result<SchemaRegistry, SchemaError> {
	farmer::build(limits)
}

/// The eight-step employee form; nested groups use dot-paths
pub fn employee() -> Arc<SchemaRegistry> {
	Arc::clone(&EMPLOYEE)
}

pub fn employee_with_limits(limits: &UploadLimits) -> Result<SchemaRegistry, SchemaError> {
	employee::build(limits)
}

pub fn admin_role() -> Arc<SchemaRegistry> {
	Arc::clone(&ADMIN_ROLE)
}

pub fn registration() -> Arc<SchemaRegistry> {
	Arc::clone(&REGISTRATION)
}

pub fn login() -> Arc<SchemaRegistry> {
	Arc::clone(&LOGIN)
}

pub fn forgot_identity() -> Arc<SchemaRegistry> {
	Arc::clone(&FORGOT_IDENTITY)
}

pub fn otp_verification() -> Arc<SchemaRegistry> {
	Arc::clone(&OTP_VERIFICATION)
}

pub fn change_password() -> Arc<SchemaRegistry> {
	Arc::clone(&CHANGE_PASSWORD)
}

impl EntityKind {
	/// The built-in registry for this entity
	pub fn registry(&self) -> Arc<SchemaRegistry> {
		match self {
			EntityKind::Farmer => farmer(),
			EntityKind::Employee => employee(),
			EntityKind::AdminRole => admin_role(),
			EntityKind::Registration => registration(),
			EntityKind::Login => login(),
			EntityKind::ForgotIdentity => forgot_identity(),
			EntityKind::OtpVerification => otp_verification(),
			EntityKind::ChangePassword => change_password(),
		}
	}
}
