//! Testing utilities for settings
//!
//! [`TestEnv`] sets process environment variables and a scratch directory for
//! config files, restoring the environment on drop. Tests using it should be
//! marked `#[serial]`.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment for settings tests
pub struct TestEnv {
	temp_dir: TempDir,
	original_env: HashMap<String, Option<String>>,
}

impl TestEnv {
	/// # Examples
	///
	/// ```
	/// use agriform_conf::testing::TestEnv;
	///
	/// let mut test_env = TestEnv::new().unwrap();
	/// test_env.set_var("AGRIFORM_DOC_KEY", "value");
	/// assert_eq!(std::env::var("AGRIFORM_DOC_KEY").unwrap(), "value");
	/// drop(test_env);
	/// assert!(std::env::var("AGRIFORM_DOC_KEY").is_err());
	/// ```
	pub fn new() -> std::io::Result<Self> {
		Ok(Self {
			temp_dir: TempDir::new()?,
			original_env: HashMap::new(),
		})
	}

	pub fn path(&self) -> &Path {
		self.temp_dir.path()
	}

	pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		self.remember(&key);

		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
		unsafe {
			env::set_var(&key, value.into());
		}
	}

	pub fn remove_var(&mut self, key: impl Into<String>) {
		let key = key.into();
		self.remember(&key);

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
		unsafe {
			env::remove_var(&key);
		}
	}

	/// Write a config file into the scratch directory
	pub fn create_config_file(&self, filename: &str, content: &str) -> std::io::Result<PathBuf> {
		let config_path = self.temp_dir.path().join(filename);
		std::fs::write(&config_path, content)?;
		Ok(config_path)
	}

	fn remember(&mut self, key: &str) {
		self.original_env
			.entry(key.to_string())
			.or_insert_with(|| env::var(key).ok());
	}
}

impl Drop for TestEnv {
	fn drop(&mut self) {
		for (key, original) in &self.original_env {
			// SAFETY: Restoring environment variables is unsafe in multi-threaded programs.
			// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
			unsafe {
				match original {
					Some(val) => env::set_var(key, val),
					None => env::remove_var(key),
				}
			}
		}
	}
}
