//! HTTP transport, submission adapter and identity flows.

#[cfg(feature = "client")]
pub use agriform_client::*;
