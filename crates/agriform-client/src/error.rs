//! Error types for the HTTP client

use agriform_forms::TransportFailure;

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by [`ApiClient`](crate::ApiClient) and the flows built on it
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	/// The server answered with a non-success status
	#[error("Request failed with status {status}: {message}")]
	Status { status: u16, message: String },

	/// The request never produced a response
	#[error("Network error: {0}")]
	Network(String),

	#[error("Invalid response body: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("Failed to read response body: {0}")]
	Body(String),

	#[error("Invalid URL: {0}")]
	Url(#[from] url::ParseError),

	#[error("Failed to read upload '{id}': {message}")]
	Blob { id: String, message: String },

	/// A bearer-authenticated call was made without a session
	#[error("Not authenticated")]
	Unauthenticated,

	/// Rejected locally before any request was sent
	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("Client configuration error: {0}")]
	Configuration(String),
}

impl From<reqwest::Error> for ClientError {
	fn from(err: reqwest::Error) -> Self {
		if let Some(status) = err.status() {
			ClientError::Status {
				status: status.as_u16(),
				message: err.to_string(),
			}
		} else if err.is_decode() {
			ClientError::Body(err.to_string())
		} else {
			ClientError::Network(err.to_string())
		}
	}
}

impl ClientError {
	pub fn status(&self) -> Option<u16> {
		match self {
			ClientError::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// 4xx response
	pub fn is_client_fault(&self) -> bool {
		self.status().is_some_and(|s| (400..500).contains(&s))
	}

	/// 5xx response
	pub fn is_server_fault(&self) -> bool {
		self.status().is_some_and(|s| s >= 500)
	}

	pub fn is_network(&self) -> bool {
		matches!(self, ClientError::Network(_))
	}
}

impl From<ClientError> for TransportFailure {
	fn from(err: ClientError) -> Self {
		match err {
			ClientError::Status { status, message } => TransportFailure::from_status(status, message),
			ClientError::Network(message) => TransportFailure::Network(message),
			other => TransportFailure::Payload(other.to_string()),
		}
	}
}
