//! Configuration sources for layered settings
//!
//! Sources are merged in priority order: environment variables > TOML file >
//! built-in defaults.

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Environment variable configuration source
///
/// Keys have the prefix stripped and are lowercased, so with the prefix
/// `AGRIFORM_` the variable `AGRIFORM_API_TIMEOUT_SECS` loads as
/// `api_timeout_secs`.
pub struct EnvSource {
	prefix: Option<String>,
}

impl EnvSource {
	/// Create a new environment variable configuration source
	///
	/// # Examples
	///
	/// ```
	/// use agriform_conf::sources::EnvSource;
	///
	/// let source = EnvSource::new();
	/// ```
	pub fn new() -> Self {
		Self { prefix: None }
	}

	/// Only load variables starting with `prefix`
	///
	/// # Examples
	///
	/// ```
	/// use agriform_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new().with_prefix("AGRIFORM_");
	/// assert_eq!(source.description(), "Environment variables (prefix: AGRIFORM_)");
	/// ```
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in std::env::vars() {
			let clean_key = match &self.prefix {
				Some(prefix) => match key.strip_prefix(prefix.as_str()) {
					Some(rest) => rest,
					None => continue,
				},
				None => key.as_str(),
			};

			config.insert(clean_key.to_lowercase(), parse_env_value(value));
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		match &self.prefix {
			Some(prefix) => format!("Environment variables (prefix: {})", prefix),
			None => "Environment variables".to_string(),
		}
	}
}

fn parse_env_value(value: String) -> Value {
	if let Ok(num) = value.parse::<i64>() {
		Value::Number(num.into())
	} else {
		match value.trim().to_lowercase().as_str() {
			"true" | "yes" | "on" => Value::Bool(true),
			"false" | "no" | "off" => Value::Bool(false),
			_ => Value::String(value),
		}
	}
}

/// TOML file configuration source
///
/// A missing file loads as empty.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// # Examples
	///
	/// ```
	/// use agriform_conf::sources::TomlFileSource;
	///
	/// let source = TomlFileSource::new("agriform.toml");
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		let json_value = serde_json::to_value(toml_value)?;

		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
		}
	}

	/// Add a default value for a configuration key
	///
	/// # Examples
	///
	/// ```
	/// use agriform_conf::sources::DefaultSource;
	/// use serde_json::json;
	///
	/// let source = DefaultSource::new().with_value("api", json!({"timeout_secs": 30}));
	/// ```
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// Merge `key = value` into `target`.
///
/// Objects merge recursively. A flat key such as `api_base_url` lands in the
/// `api` table when `target` already has one, which is how environment
/// variables reach nested settings.
pub(crate) fn merge_entry(target: &mut serde_json::Map<String, Value>, key: &str, value: Value) {
	if let Some(Value::Object(existing)) = target.get_mut(key) {
		if let Value::Object(incoming) = value {
			for (k, v) in incoming {
				merge_entry(existing, &k, v);
			}
		} else {
			tracing::warn!(key, "Ignoring scalar value for settings table");
		}
		return;
	}

	if !target.contains_key(key)
		&& let Some((section, rest)) = key.split_once('_')
		&& let Some(Value::Object(table)) = target.get_mut(section)
	{
		merge_entry(table, rest, value);
		return;
	}

	target.insert(key.to_string(), value);
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use serial_test::serial;
	use std::env;
	use tempfile::TempDir;

	#[rstest]
	#[serial(env)]
	fn test_env_source_strips_prefix() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::set_var("AGRIFORM_TEST_API_TIMEOUT_SECS", "45");
			env::set_var("AGRIFORM_TEST_API_BASE_URL", "https://farm.example/api");
		}

		let config = EnvSource::new()
			.with_prefix("AGRIFORM_TEST_")
			.load()
			.unwrap();

		assert_eq!(config.len(), 2);
		assert_eq!(config["api_timeout_secs"], json!(45));
		assert_eq!(config["api_base_url"], json!("https://farm.example/api"));

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::remove_var("AGRIFORM_TEST_API_TIMEOUT_SECS");
			env::remove_var("AGRIFORM_TEST_API_BASE_URL");
		}
	}

	#[rstest]
	#[case("30", json!(30))]
	#[case("true", json!(true))]
	#[case("Off", json!(false))]
	#[case("http://x", json!("http://x"))]
	fn test_parse_env_value(#[case] raw: &str, #[case] expected: Value) {
		assert_eq!(parse_env_value(raw.to_string()), expected);
	}

	#[rstest]
	fn test_toml_source_reads_tables() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("agriform.toml");
		fs::write(
			&path,
			"[api]\nbase_url = \"https://farm.example/api\"\ntimeout_secs = 10\n",
		)
		.unwrap();

		let config = TomlFileSource::new(&path).load().unwrap();

		assert_eq!(
			config["api"],
			json!({"base_url": "https://farm.example/api", "timeout_secs": 10})
		);
	}

	#[rstest]
	fn test_missing_toml_file_is_empty() {
		let temp_dir = TempDir::new().unwrap();

		let config = TomlFileSource::new(temp_dir.path().join("absent.toml"))
			.load()
			.unwrap();

		assert!(config.is_empty());
	}

	#[rstest]
	fn test_malformed_toml_is_reported() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("broken.toml");
		fs::write(&path, "[api\nbase_url = ").unwrap();

		let result = TomlFileSource::new(&path).load();

		assert!(matches!(result, Err(SourceError::Toml(_))));
	}

	#[rstest]
	fn test_merge_flat_key_into_section() {
		// Arrange
		let mut target = json!({"api": {"base_url": "a", "timeout_secs": 30}})
			.as_object()
			.cloned()
			.unwrap();

		// Act
		merge_entry(&mut target, "api_timeout_secs", json!(5));
		merge_entry(&mut target, "api", json!({"base_url": "b"}));
		merge_entry(&mut target, "unrelated", json!(1));

		// Assert
		assert_eq!(
			Value::Object(target),
			json!({"api": {"base_url": "b", "timeout_secs": 5}, "unrelated": 1})
		);
	}
}
