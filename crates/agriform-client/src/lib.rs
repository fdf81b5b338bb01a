//! HTTP side of agriform
//!
//! This crate provides:
//! - [`ApiClient`], a reqwest client with a configurable base URL and timeout
//! - [`RecordSubmissionAdapter`], the [`FormSubmitter`](agriform_forms::FormSubmitter)
//!   that stores finished wizards as `POST /farmers` or `PUT /farmers/{id}`
//! - Login, registration and profile calls ([`AuthService`])
//! - Password and user-id recovery ([`RecoveryFlow`])
//! - Country/state lookups and a debounced email availability check
//!
//! ## Example
//!
//! ```no_run
//! use agriform_client::{
//!     ApiClient, AuthService, HttpRecordTransport, LocalBlobStore, RecordSubmissionAdapter,
//!     SessionContext,
//! };
//! use agriform_conf::Settings;
//! use agriform_forms::{WizardController, catalog};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let settings = Settings::load()?;
//! let session = Arc::new(SessionContext::new());
//! let client = ApiClient::new(&settings.api, Arc::clone(&session))?;
//!
//! AuthService::new(client.clone()).login("ravi@example.com", "Secret@1").await?;
//!
//! let transport = HttpRecordTransport::new(client, Arc::new(LocalBlobStore::new("uploads")));
//! let adapter = RecordSubmissionAdapter::farmers(transport, session);
//! let wizard = WizardController::new(catalog::farmer(), adapter);
//! # let _ = wizard;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod auth;
pub mod blob;
pub mod error;
pub mod lookup;
pub mod recovery;
pub mod session;
pub mod transport;

pub use adapter::{HttpRecordTransport, RecordSubmissionAdapter, RecordTransport};
pub use auth::{AuthService, LoginOutcome};
pub use blob::{BlobStore, LocalBlobStore, MemoryBlobStore};
pub use error::{ClientError, ClientResult};
pub use lookup::{EmailAvailability, EmailAvailabilityChecker, EmailStatus, ReferenceLookup};
pub use recovery::RecoveryFlow;
pub use session::{RecoveryContext, RecoveryKind, RecoveryState, SessionContext};
pub use transport::ApiClient;
