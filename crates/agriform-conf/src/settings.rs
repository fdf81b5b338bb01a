//! Typed settings and the builder that layers sources into them

use crate::sources::{ConfigSource, EnvSource, SourceError, TomlFileSource, merge_entry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "AGRIFORM_";

const MEGABYTE: u64 = 1024 * 1024;

/// Errors raised while loading or validating settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},

	#[error("Invalid settings structure: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },
}

/// Remote API the client talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
	pub base_url: String,
	pub timeout_secs: u64,
}

impl ApiSettings {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

impl Default for ApiSettings {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:8080/api".to_string(),
			timeout_secs: 30,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
	pub max_photo_bytes: u64,
	pub max_document_bytes: u64,
}

impl Default for UploadSettings {
	fn default() -> Self {
		Self {
			max_photo_bytes: 5 * MEGABYTE,
			max_document_bytes: 10 * MEGABYTE,
		}
	}
}

/// Debounce window for the email availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniquenessSettings {
	pub debounce_ms: u64,
}

impl UniquenessSettings {
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}
}

impl Default for UniquenessSettings {
	fn default() -> Self {
		Self { debounce_ms: 500 }
	}
}

/// Application settings
///
/// # Examples
///
/// ```
/// use agriform_conf::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.api.base_url, "http://localhost:8080/api");
/// assert_eq!(settings.api.timeout_secs, 30);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub api: ApiSettings,
	pub uploads: UploadSettings,
	pub uniqueness: UniquenessSettings,
}

impl Settings {
	/// Load from `agriform.toml` in the working directory and `AGRIFORM_*`
	/// environment variables
	pub fn load() -> Result<Self, SettingsError> {
		SettingsBuilder::new()
			.with_toml_file("agriform.toml")
			.with_env_prefix(ENV_PREFIX)
			.build()
	}

	/// Check cross-field constraints serde cannot express
	pub fn validate(&self) -> Result<(), SettingsError> {
		let base_url = self.api.base_url.trim();
		if base_url.is_empty() {
			return Err(invalid("api.base_url", "must not be empty"));
		}
		let parsed = Url::parse(base_url)
			.map_err(|e| invalid("api.base_url", format!("not a valid URL ({e})")))?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(invalid("api.base_url", "scheme must be http or https"));
		}

		if self.api.timeout_secs == 0 {
			return Err(invalid("api.timeout_secs", "must be greater than zero"));
		}
		if self.uploads.max_photo_bytes == 0 {
			return Err(invalid("uploads.max_photo_bytes", "must be greater than zero"));
		}
		if self.uploads.max_document_bytes == 0 {
			return Err(invalid("uploads.max_document_bytes", "must be greater than zero"));
		}

		Ok(())
	}
}

fn invalid(key: &str, message: impl Into<String>) -> SettingsError {
	SettingsError::InvalidValue {
		key: key.to_string(),
		message: message.into(),
	}
}

/// Layers configuration sources over the built-in defaults.
///
/// # Examples
///
/// ```
/// use agriform_conf::{SettingsBuilder, sources::DefaultSource};
/// use serde_json::json;
///
/// let settings = SettingsBuilder::new()
///     .add_source(DefaultSource::new().with_value("api", json!({"timeout_secs": 5})))
///     .build()
///     .unwrap();
/// assert_eq!(settings.api.timeout_secs, 5);
/// assert_eq!(settings.uploads.max_photo_bytes, 5 * 1024 * 1024);
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn with_toml_file(self, path: impl Into<PathBuf>) -> Self {
		self.add_source(TomlFileSource::new(path))
	}

	pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
		self.add_source(EnvSource::new().with_prefix(prefix))
	}

	/// Merge sources from lowest to highest priority, then deserialize and
	/// validate
	pub fn build(mut self) -> Result<Settings, SettingsError> {
		self.sources.sort_by_key(|s| s.priority());

		let mut merged = match serde_json::to_value(Settings::default())? {
			Value::Object(map) => map,
			_ => serde_json::Map::new(),
		};

		for source in &self.sources {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(source = %source.description(), keys = values.len(), "Loaded settings source");
			for (key, value) in values {
				merge_entry(&mut merged, &key, value);
			}
		}

		let settings: Settings = serde_json::from_value(Value::Object(merged))?;
		settings.validate()?;
		Ok(settings)
	}
}
