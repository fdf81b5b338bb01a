//! Layered settings.
//!
//! # Examples
//!
//! ```rust
//! use agriform::conf::Settings;
//!
//! assert_eq!(Settings::default().uploads.max_document_bytes, 10 * 1024 * 1024);
//! ```

#[cfg(feature = "conf")]
pub use agriform_conf::*;
