//! Form values accumulated by a wizard session
//!
//! A [`FormValueMap`] maps field names to [`FieldValue`]s. Nested groups use
//! dot-paths (`address.country`); the map itself stays flat and only expands
//! the paths when it is serialized into a JSON payload.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::collections::hash_map;

/// Reference to a client-side binary blob selected for upload.
///
/// Only the reference travels through the wizard. The content is read from a
/// blob store when the submission payload is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
	/// Key of the blob in the caller's blob store (for example a local path)
	pub id: String,
	pub file_name: String,
	pub content_type: String,
	pub size: u64,
}

impl FileRef {
	/// Create a new file reference
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::FileRef;
	///
	/// let file = FileRef::new("blob-1", "passbook.pdf", "application/pdf", 2048);
	/// assert_eq!(file.extension(), Some("pdf"));
	/// ```
	pub fn new(
		id: impl Into<String>,
		file_name: impl Into<String>,
		content_type: impl Into<String>,
		size: u64,
	) -> Self {
		Self {
			id: id.into(),
			file_name: file_name.into(),
			content_type: content_type.into(),
			size,
		}
	}

	pub fn extension(&self) -> Option<&str> {
		self.file_name
			.rsplit_once('.')
			.map(|(_, ext)| ext)
			.filter(|ext| !ext.is_empty())
	}
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	Null,
	Bool(bool),
	Number(f64),
	Text(String),
	/// Multi-select values
	List(Vec<String>),
	File(FileRef),
}

impl FieldValue {
	pub fn is_null(&self) -> bool {
		matches!(self, FieldValue::Null)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			FieldValue::Text(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<f64> {
		match self {
			FieldValue::Number(n) => Some(*n),
			FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
			_ => None,
		}
	}

	pub fn as_file(&self) -> Option<&FileRef> {
		match self {
			FieldValue::File(f) => Some(f),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			FieldValue::List(items) => Some(items),
			_ => None,
		}
	}

	/// Returns `None` for values that count as "not provided".
	///
	/// Null, blank or whitespace-only text and empty lists are all treated as
	/// absent, so optional fields left empty never reach format checks.
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::FieldValue;
	///
	/// assert!(FieldValue::Text("   ".to_string()).normalized().is_none());
	/// assert!(FieldValue::Null.normalized().is_none());
	/// assert!(FieldValue::Text("Paddy".to_string()).normalized().is_some());
	/// ```
	pub fn normalized(&self) -> Option<&FieldValue> {
		match self {
			FieldValue::Null => None,
			FieldValue::Text(s) if s.trim().is_empty() => None,
			FieldValue::List(items) if items.is_empty() => None,
			other => Some(other),
		}
	}

	/// Text rendering used by pattern checks, equality checks and multipart
	/// text parts.
	///
	/// Integral numbers render without a fractional part so a phone number
	/// entered as a number still matches digit patterns.
	pub fn to_text(&self) -> Cow<'_, str> {
		match self {
			FieldValue::Null => Cow::Borrowed(""),
			FieldValue::Bool(b) => Cow::Owned(b.to_string()),
			FieldValue::Number(n) => Cow::Owned(format_number(*n)),
			FieldValue::Text(s) => Cow::Borrowed(s),
			FieldValue::List(items) => Cow::Owned(items.join(",")),
			FieldValue::File(f) => Cow::Borrowed(&f.file_name),
		}
	}

	fn to_json(&self) -> serde_json::Value {
		match self {
			FieldValue::Null => serde_json::Value::Null,
			FieldValue::Bool(b) => serde_json::Value::Bool(*b),
			FieldValue::Number(n) => serde_json::Number::from_f64(*n)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			FieldValue::Text(s) => serde_json::Value::String(s.clone()),
			FieldValue::List(items) => serde_json::Value::Array(
				items
					.iter()
					.map(|item| serde_json::Value::String(item.clone()))
					.collect(),
			),
			FieldValue::File(f) => serde_json::json!({
				"fileName": f.file_name,
				"contentType": f.content_type,
				"size": f.size,
			}),
		}
	}
}

fn format_number(n: f64) -> String {
	if n.fract() == 0.0 && n.abs() < 1e15 {
		format!("{}", n as i64)
	} else {
		n.to_string()
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		FieldValue::Number(value)
	}
}

impl From<i64> for FieldValue {
	fn from(value: i64) -> Self {
		FieldValue::Number(value as f64)
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		FieldValue::Bool(value)
	}
}

impl From<FileRef> for FieldValue {
	fn from(value: FileRef) -> Self {
		FieldValue::File(value)
	}
}

impl From<Vec<String>> for FieldValue {
	fn from(value: Vec<String>) -> Self {
		FieldValue::List(value)
	}
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(FieldValue::Null)
	}
}

/// Accumulated values of one wizard session, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValueMap {
	values: HashMap<String, FieldValue>,
}

impl FormValueMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&FieldValue> {
		self.values.get(name)
	}

	/// Store a value, returning the previous one
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::{FieldValue, FormValueMap};
	///
	/// let mut values = FormValueMap::new();
	/// values.set("address.country", "India");
	/// assert_eq!(values.get("address.country"), Some(&FieldValue::from("India")));
	/// ```
	pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
		self.values.insert(name.into(), value.into())
	}

	pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
		self.values.remove(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Whether the field holds a value that counts as provided
	pub fn is_present(&self, name: &str) -> bool {
		self.normalized(name).is_some()
	}

	/// The value of `name` after blank normalization
	pub fn normalized(&self, name: &str) -> Option<&FieldValue> {
		self.values.get(name).and_then(FieldValue::normalized)
	}

	pub fn clear(&mut self) {
		self.values.clear();
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> hash_map::Iter<'_, String, FieldValue> {
		self.values.iter()
	}

	/// Iterate over every file reference held by the map
	pub fn files(&self) -> impl Iterator<Item = (&str, &FileRef)> {
		self.values
			.iter()
			.filter_map(|(name, value)| value.as_file().map(|f| (name.as_str(), f)))
	}

	pub fn has_files(&self) -> bool {
		self.files().next().is_some()
	}

	/// Merge `other` into this map, overwriting existing keys
	pub fn extend(&mut self, other: FormValueMap) {
		self.values.extend(other.values);
	}

	/// Serialize into a JSON object, expanding dot-paths into nested objects.
	///
	/// A key whose parent path already holds a non-object value is kept flat.
	///
	/// # Examples
	///
	/// ```
	/// use agriform_forms::FormValueMap;
	/// use serde_json::json;
	///
	/// let mut values = FormValueMap::new();
	/// values.set("address.country", "India");
	/// values.set("address.state", "Telangana");
	/// values.set("firstName", "Ravi");
	///
	/// assert_eq!(
	///     values.to_json(),
	///     json!({
	///         "firstName": "Ravi",
	///         "address": { "country": "India", "state": "Telangana" }
	///     })
	/// );
	/// ```
	pub fn to_json(&self) -> serde_json::Value {
		let mut root = serde_json::Map::new();

		let mut keys: Vec<&String> = self.values.keys().collect();
		keys.sort();

		for key in keys {
			let value = self.values[key].to_json();
			if !insert_path(&mut root, key, value.clone()) {
				root.insert(key.clone(), value);
			}
		}

		serde_json::Value::Object(root)
	}
}

fn insert_path(
	root: &mut serde_json::Map<String, serde_json::Value>,
	path: &str,
	value: serde_json::Value,
) -> bool {
	let mut segments = path.split('.').peekable();
	let mut current = root;

	while let Some(segment) = segments.next() {
		if segment.is_empty() {
			return false;
		}
		if segments.peek().is_none() {
			if current.get(segment).is_some_and(|v| v.is_object()) {
				return false;
			}
			current.insert(segment.to_string(), value);
			return true;
		}

		let entry = current
			.entry(segment.to_string())
			.or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
		match entry {
			serde_json::Value::Object(map) => current = map,
			_ => return false,
		}
	}

	false
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValueMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl IntoIterator for FormValueMap {
	type Item = (String, FieldValue);
	type IntoIter = hash_map::IntoIter<String, FieldValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.into_iter()
	}
}

impl<'a> IntoIterator for &'a FormValueMap {
	type Item = (&'a String, &'a FieldValue);
	type IntoIter = hash_map::Iter<'a, String, FieldValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(FieldValue::Null, true)]
	#[case(FieldValue::Text(String::new()), true)]
	#[case(FieldValue::Text(" \t ".to_string()), true)]
	#[case(FieldValue::List(vec![]), true)]
	#[case(FieldValue::Text("x".to_string()), false)]
	#[case(FieldValue::Number(0.0), false)]
	#[case(FieldValue::Bool(false), false)]
	fn test_normalized_treats_blank_as_absent(#[case] value: FieldValue, #[case] absent: bool) {
		assert_eq!(value.normalized().is_none(), absent);
	}

	#[rstest]
	fn test_integral_number_renders_without_fraction() {
		assert_eq!(FieldValue::Number(9876543210.0).to_text(), "9876543210");
		assert_eq!(FieldValue::Number(2.5).to_text(), "2.5");
	}

	#[rstest]
	fn test_file_reference_keeps_metadata_only() {
		// Arrange
		let mut values = FormValueMap::new();
		let file = FileRef::new("/tmp/cert.pdf", "cert.pdf", "application/pdf", 1024);

		// Act
		values.set("soilTestCertificate", file.clone());

		// Assert
		assert!(values.has_files());
		let (name, stored) = values.files().next().unwrap();
		assert_eq!(name, "soilTestCertificate");
		assert_eq!(stored, &file);
		assert_eq!(
			values.to_json(),
			json!({
				"soilTestCertificate": {
					"fileName": "cert.pdf",
					"contentType": "application/pdf",
					"size": 1024
				}
			})
		);
	}

	#[rstest]
	fn test_to_json_keeps_conflicting_path_flat() {
		// Arrange
		let mut values = FormValueMap::new();
		values.set("bank", "SBI");
		values.set("bank.ifscCode", "SBIN0001234");

		// Act
		let json = values.to_json();

		// Assert
		assert_eq!(json["bank"], json!("SBI"));
		assert_eq!(json["bank.ifscCode"], json!("SBIN0001234"));
	}

	#[rstest]
	fn test_untagged_deserialization() {
		let values: FormValueMap = serde_json::from_value(json!({
			"firstName": "Ravi",
			"age": 42,
			"agreed": true,
			"photo": null,
			"modules": ["dashboard", "reports"]
		}))
		.unwrap();

		assert_eq!(values.get("firstName"), Some(&FieldValue::from("Ravi")));
		assert_eq!(values.get("age"), Some(&FieldValue::Number(42.0)));
		assert_eq!(values.get("agreed"), Some(&FieldValue::Bool(true)));
		assert_eq!(values.get("photo"), Some(&FieldValue::Null));
		assert_eq!(
			values.get("modules").and_then(FieldValue::as_list),
			Some(&["dashboard".to_string(), "reports".to_string()][..])
		);
	}
}
