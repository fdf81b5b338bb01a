//! # agriform configuration
//!
//! Layered settings for the agriform client: built-in defaults, an optional
//! TOML file and `AGRIFORM_*` environment variables, highest priority last.
//!
//! ```toml
//! [api]
//! base_url = "https://registry.example/api"
//! timeout_secs = 20
//!
//! [uploads]
//! max_photo_bytes = 5242880
//! ```
//!
//! `AGRIFORM_API_TIMEOUT_SECS=10` then overrides the file's timeout.

pub mod settings;
pub mod sources;
pub mod testing;

pub use settings::{
	ApiSettings, ENV_PREFIX, Settings, SettingsBuilder, SettingsError, UniquenessSettings,
	UploadSettings,
};
