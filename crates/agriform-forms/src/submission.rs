//! The seam between a finished wizard and the transport that stores it

use crate::value::FormValueMap;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Whether a submission created a record or updated an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOperation {
	Create,
	Update,
}

/// What the transport returned for an accepted submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
	pub record_id: Option<String>,
	pub operation: SubmissionOperation,
	pub response: serde_json::Value,
}

impl SubmissionReceipt {
	pub fn new(operation: SubmissionOperation, response: serde_json::Value) -> Self {
		let record_id = ["id", "_id", "farmerId"].iter().find_map(|key| {
			match response.get(*key)? {
				serde_json::Value::String(s) => Some(s.clone()),
				serde_json::Value::Number(n) => Some(n.to_string()),
				_ => None,
			}
		});
		Self {
			record_id,
			operation,
			response,
		}
	}
}

/// Why the transport did not accept a submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
	/// The server rejected the request (4xx)
	#[error("Request rejected with status {status}: {message}")]
	ClientFault { status: u16, message: String },
	/// The server failed while handling the request (5xx)
	#[error("Server error with status {status}")]
	ServerFault { status: u16 },
	/// The request never produced a response
	#[error("Network error: {0}")]
	Network(String),
	/// The request or response body could not be built or read
	#[error("Payload error: {0}")]
	Payload(String),
}

impl TransportFailure {
	pub fn from_status(status: u16, message: impl Into<String>) -> Self {
		if status >= 500 {
			TransportFailure::ServerFault { status }
		} else {
			TransportFailure::ClientFault {
				status,
				message: message.into(),
			}
		}
	}

	pub fn status(&self) -> Option<u16> {
		match self {
			TransportFailure::ClientFault { status, .. } | TransportFailure::ServerFault { status } => {
				Some(*status)
			}
			_ => None,
		}
	}

	pub fn is_client_fault(&self) -> bool {
		matches!(self, TransportFailure::ClientFault { .. })
	}

	pub fn is_server_fault(&self) -> bool {
		matches!(self, TransportFailure::ServerFault { .. })
	}

	pub fn is_network(&self) -> bool {
		matches!(self, TransportFailure::Network(_))
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
	/// No bearer credential was available; nothing was sent
	#[error("Authentication required")]
	AuthenticationRequired,
	#[error("Submission failed: {0}")]
	SubmissionFailed(#[from] TransportFailure),
}

impl SubmissionError {
	/// The single message shown to the user, whatever the cause
	pub fn user_message(&self) -> &'static str {
		match self {
			SubmissionError::AuthenticationRequired => "Please log in again to continue.",
			SubmissionError::SubmissionFailed(_) => "Submission failed. Please try again.",
		}
	}
}

/// Delivers finalized wizard values to an external store.
///
/// `existing_id` selects an update of that record; `None` creates one.
#[async_trait]
pub trait FormSubmitter: Send + Sync {
	async fn submit(
		&self,
		values: FormValueMap,
		existing_id: Option<String>,
	) -> Result<SubmissionReceipt, SubmissionError>;
}

#[async_trait]
impl<T: FormSubmitter + ?Sized> FormSubmitter for Arc<T> {
	async fn submit(
		&self,
		values: FormValueMap,
		existing_id: Option<String>,
	) -> Result<SubmissionReceipt, SubmissionError> {
		(**self).submit(values, existing_id).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(400, true, false)]
	#[case(404, true, false)]
	#[case(422, true, false)]
	#[case(500, false, true)]
	#[case(503, false, true)]
	fn test_status_classification(#[case] status: u16, #[case] client: bool, #[case] server: bool) {
		let failure = TransportFailure::from_status(status, "rejected");

		assert_eq!(failure.is_client_fault(), client);
		assert_eq!(failure.is_server_fault(), server);
		assert_eq!(failure.status(), Some(status));
	}

	#[rstest]
	fn test_user_message_is_generic() {
		let client = SubmissionError::from(TransportFailure::from_status(400, "bad"));
		let network = SubmissionError::from(TransportFailure::Network("reset".to_string()));

		assert_eq!(client.user_message(), network.user_message());
		assert_ne!(
			SubmissionError::AuthenticationRequired.user_message(),
			client.user_message()
		);
	}

	#[rstest]
	#[case(json!({"id": "f-17"}), Some("f-17"))]
	#[case(json!({"_id": 42}), Some("42"))]
	#[case(json!({"message": "ok"}), None)]
	fn test_receipt_record_id(#[case] response: serde_json::Value, #[case] expected: Option<&str>) {
		let receipt = SubmissionReceipt::new(SubmissionOperation::Create, response);
		assert_eq!(receipt.record_id.as_deref(), expected);
	}
}
