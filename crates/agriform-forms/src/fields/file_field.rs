use crate::field::{FieldError, FieldResult};
use crate::value::FileRef;

/// Size and type constraints for an uploaded file.
///
/// MIME types are compared case-insensitively; an entry such as `image/*`
/// accepts every subtype.
#[derive(Debug, Clone)]
pub struct FileValidator {
	max_bytes: Option<u64>,
	allowed_mime_types: Option<Vec<String>>,
	allow_empty_file: bool,
	size_message: Option<String>,
	type_message: Option<String>,
}

impl FileValidator {
	pub const MIME_JPEG: &'static str = "image/jpeg";
	pub const MIME_PNG: &'static str = "image/png";
	pub const MIME_PDF: &'static str = "application/pdf";
	pub const MIME_ANY_IMAGE: &'static str = "image/*";

	pub const MEGABYTE: u64 = 1024 * 1024;

	/// A validator with no size or type restriction
	pub fn new() -> Self {
		Self {
			max_bytes: None,
			allowed_mime_types: None,
			allow_empty_file: false,
			size_message: None,
			type_message: None,
		}
	}

	/// Images of any subtype
	pub fn images() -> Self {
		Self::new().with_mime_types([Self::MIME_ANY_IMAGE])
	}

	/// JPEG, PNG or PDF scans of paper documents
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::{FileRef, fields::FileValidator};
	///
	/// let validator = FileValidator::scanned_documents().with_max_bytes(5 * FileValidator::MEGABYTE);
	///
	/// let pdf = FileRef::new("1", "passbook.pdf", "application/pdf", 1024);
	/// let doc = FileRef::new("2", "passbook.docx", "application/msword", 1024);
	/// assert!(validator.validate(&pdf).is_ok());
	/// assert!(validator.validate(&doc).is_err());
	/// ```
	pub fn scanned_documents() -> Self {
		Self::new().with_mime_types([Self::MIME_JPEG, Self::MIME_PNG, Self::MIME_PDF])
	}

	pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
		self.max_bytes = Some(max_bytes);
		self
	}

	pub fn with_mime_types<I, S>(mut self, mime_types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.allowed_mime_types = Some(
			mime_types
				.into_iter()
				.map(|m| m.into().to_ascii_lowercase())
				.collect(),
		);
		self
	}

	pub fn allow_empty_file(mut self, allow: bool) -> Self {
		self.allow_empty_file = allow;
		self
	}

	pub fn with_size_message(mut self, message: impl Into<String>) -> Self {
		self.size_message = Some(message.into());
		self
	}

	pub fn with_type_message(mut self, message: impl Into<String>) -> Self {
		self.type_message = Some(message.into());
		self
	}

	pub fn max_bytes(&self) -> Option<u64> {
		self.max_bytes
	}

	fn mime_allowed(&self, content_type: &str) -> bool {
		let Some(allowed) = &self.allowed_mime_types else {
			return true;
		};

		let content_type = content_type.to_ascii_lowercase();
		allowed.iter().any(|pattern| match pattern.strip_suffix("/*") {
			Some(major) => content_type
				.split_once('/')
				.is_some_and(|(m, _)| m == major),
			None => *pattern == content_type,
		})
	}

	pub fn validate(&self, file: &FileRef) -> FieldResult<()> {
		if file.file_name.is_empty() {
			return Err(FieldError::Invalid("Missing filename".to_string()));
		}

		if !self.allow_empty_file && file.size == 0 {
			return Err(FieldError::Validation(
				"The submitted file is empty".to_string(),
			));
		}

		if let Some(max) = self.max_bytes
			&& file.size > max
		{
			let msg = self
				.size_message
				.as_deref()
				.unwrap_or("File is too large");
			return Err(FieldError::Validation(msg.to_string()));
		}

		if !self.mime_allowed(&file.content_type) {
			let msg = self
				.type_message
				.as_deref()
				.unwrap_or("Unsupported file format");
			return Err(FieldError::Validation(msg.to_string()));
		}

		Ok(())
	}
}

impl Default for FileValidator {
	fn default() -> Self {
		Self::new()
	}
}
