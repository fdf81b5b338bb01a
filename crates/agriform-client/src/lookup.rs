//! Reference lists and the debounced email availability check

use crate::error::{ClientError, ClientResult};
use crate::transport::ApiClient;
use agriform_forms::validators::is_email;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Country and state lists for the registration form
pub struct ReferenceLookup {
	client: ApiClient,
}

impl ReferenceLookup {
	pub fn new(client: ApiClient) -> Self {
		Self { client }
	}

	/// `GET /auth/countries`
	pub async fn countries(&self) -> ClientResult<Vec<String>> {
		let response = self.client.get_json("/auth/countries").await?;
		names(response)
	}

	/// `GET /auth/states/{country}`
	pub async fn states(&self, country: &str) -> ClientResult<Vec<String>> {
		let url = self.client.endpoint_segments(&["auth", "states", country])?;
		let response = self.client.get_url(url).await?;
		names(response)
	}
}

/// Accepts `["India"]` or `[{"name": "India"}]`
fn names(response: Value) -> ClientResult<Vec<String>> {
	let Value::Array(items) = response else {
		return Err(ClientError::Body("Expected a list".to_string()));
	};

	items
		.into_iter()
		.map(|item| match item {
			Value::String(name) => Ok(name),
			Value::Object(mut map) => match map.remove("name") {
				Some(Value::String(name)) => Ok(name),
				_ => Err(ClientError::Body("List entry has no name".to_string())),
			},
			_ => Err(ClientError::Body("Unexpected list entry".to_string())),
		})
		.collect()
}

/// Answers whether an email address is still free
#[async_trait]
pub trait EmailAvailability: Send + Sync {
	async fn is_email_available(&self, email: &str) -> ClientResult<bool>;
}

/// `GET /auth/check-email?email=...` answering `{"available": bool}`
#[async_trait]
impl EmailAvailability for ApiClient {
	async fn is_email_available(&self, email: &str) -> ClientResult<bool> {
		let mut url = self.endpoint("/auth/check-email")?;
		url.query_pairs_mut().append_pair("email", email);

		let response = self.get_url(url).await?;
		response
			.get("available")
			.and_then(Value::as_bool)
			.ok_or_else(|| ClientError::Body("Missing 'available' flag".to_string()))
	}
}

/// Latest known availability of the email being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailStatus {
	Idle,
	/// Not a well-formed address; nothing was sent
	Malformed { email: String },
	Checking { email: String },
	Available { email: String },
	Taken { email: String },
	/// The check itself failed
	Unknown { email: String },
}

/// Debounced availability check.
///
/// Each [`check`](Self::check) cancels the pending one. Dropping the checker
/// cancels any check in flight, so no status is published after the drop.
/// Must be used inside a tokio runtime.
pub struct EmailAvailabilityChecker {
	source: Arc<dyn EmailAvailability>,
	debounce: Duration,
	pending: Mutex<Option<JoinHandle<()>>>,
	status: watch::Sender<EmailStatus>,
}

impl EmailAvailabilityChecker {
	pub fn new(source: Arc<dyn EmailAvailability>, debounce: Duration) -> Self {
		let (status, _) = watch::channel(EmailStatus::Idle);
		Self {
			source,
			debounce,
			pending: Mutex::new(None),
			status,
		}
	}

	pub fn subscribe(&self) -> watch::Receiver<EmailStatus> {
		self.status.subscribe()
	}

	pub fn status(&self) -> EmailStatus {
		self.status.borrow().clone()
	}

	/// Schedule a check of `email` after the debounce window
	pub fn check(&self, email: &str) {
		self.cancel_pending();

		let email = email.trim().to_string();
		if email.is_empty() {
			self.status.send_replace(EmailStatus::Idle);
			return;
		}
		if !is_email(&email) {
			self.status.send_replace(EmailStatus::Malformed { email });
			return;
		}

		self.status.send_replace(EmailStatus::Checking {
			email: email.clone(),
		});

		let source = Arc::clone(&self.source);
		let status = self.status.clone();
		let debounce = self.debounce;
		let handle = tokio::spawn(async move {
			tokio::time::sleep(debounce).await;
			let next = match source.is_email_available(&email).await {
				Ok(true) => EmailStatus::Available { email },
				Ok(false) => EmailStatus::Taken { email },
				Err(e) => {
					tracing::warn!(error = %e, "Email availability check failed");
					EmailStatus::Unknown { email }
				}
			};
			status.send_replace(next);
		});
		*self.pending.lock() = Some(handle);
	}

	fn cancel_pending(&self) {
		if let Some(handle) = self.pending.lock().take() {
			handle.abort();
		}
	}
}

impl Drop for EmailAvailabilityChecker {
	fn drop(&mut self) {
		self.cancel_pending();
	}
}
