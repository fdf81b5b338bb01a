//! Submission adapter that stores finished wizard values through the API

use crate::blob::BlobStore;
use crate::error::ClientResult;
use crate::session::SessionContext;
use crate::transport::ApiClient;
use agriform_forms::{
	FormSubmitter, FormValueMap, SubmissionError, SubmissionOperation, SubmissionReceipt,
};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

/// Sends one record payload with an explicit bearer token.
///
/// `segments` name the resource below the API base, one path segment each.
#[async_trait]
pub trait RecordTransport: Send + Sync {
	async fn send_record(
		&self,
		method: Method,
		segments: Vec<String>,
		values: FormValueMap,
		token: &str,
	) -> ClientResult<Value>;
}

/// [`ApiClient`] paired with the blob store its file parts are read from
pub struct HttpRecordTransport {
	client: ApiClient,
	blobs: Arc<dyn BlobStore>,
}

impl HttpRecordTransport {
	pub fn new(client: ApiClient, blobs: Arc<dyn BlobStore>) -> Self {
		Self { client, blobs }
	}
}

#[async_trait]
impl RecordTransport for HttpRecordTransport {
	async fn send_record(
		&self,
		method: Method,
		segments: Vec<String>,
		values: FormValueMap,
		token: &str,
	) -> ClientResult<Value> {
		let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
		let url = self.client.endpoint_segments(&segments)?;
		self.client
			.send_form(method, url, &values, self.blobs.as_ref(), Some(token))
			.await
	}
}

/// Stores wizard values as records of one collection.
///
/// A missing session token fails with
/// [`SubmissionError::AuthenticationRequired`] before the transport is
/// touched. Failures are reported once and never retried.
pub struct RecordSubmissionAdapter<T> {
	transport: T,
	session: Arc<SessionContext>,
	collection: String,
}

impl<T: RecordTransport> RecordSubmissionAdapter<T> {
	pub fn new(transport: T, session: Arc<SessionContext>, collection: impl Into<String>) -> Self {
		Self {
			transport,
			session,
			collection: collection.into(),
		}
	}

	/// Adapter for `/farmers`
	pub fn farmers(transport: T, session: Arc<SessionContext>) -> Self {
		Self::new(transport, session, "farmers")
	}

	pub fn collection(&self) -> &str {
		&self.collection
	}
}

#[async_trait]
impl<T: RecordTransport> FormSubmitter for RecordSubmissionAdapter<T> {
	async fn submit(
		&self,
		values: FormValueMap,
		existing_id: Option<String>,
	) -> Result<SubmissionReceipt, SubmissionError> {
		let Some(token) = self.session.token() else {
			tracing::warn!(collection = %self.collection, "Submission blocked: no session");
			return Err(SubmissionError::AuthenticationRequired);
		};

		let (method, segments, operation) = match existing_id {
			Some(id) => (
				Method::PUT,
				vec![self.collection.clone(), id],
				SubmissionOperation::Update,
			),
			None => (
				Method::POST,
				vec![self.collection.clone()],
				SubmissionOperation::Create,
			),
		};

		let response = self
			.transport
			.send_record(method, segments, values, &token)
			.await
			.map_err(|e| {
				tracing::warn!(collection = %self.collection, ?operation, error = %e, "Submission failed");
				SubmissionError::SubmissionFailed(e.into())
			})?;

		tracing::info!(collection = %self.collection, ?operation, "Submission accepted");
		Ok(SubmissionReceipt::new(operation, response))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ClientError;
	use mockall::mock;
	use rstest::rstest;
	use serde_json::json;

	mock! {
		Transport {}

		#[async_trait]
		impl RecordTransport for Transport {
			async fn send_record(
				&self,
				method: Method,
				segments: Vec<String>,
				values: FormValueMap,
				token: &str,
			) -> ClientResult<Value>;
		}
	}

	fn values() -> FormValueMap {
		[("firstName", "Ravi"), ("pincode", "500001")]
			.into_iter()
			.collect()
	}

	#[rstest]
	#[tokio::test]
	async fn test_missing_token_never_calls_transport() {
		// Arrange
		let mut transport = MockTransport::new();
		transport.expect_send_record().never();
		let adapter = RecordSubmissionAdapter::farmers(transport, Arc::new(SessionContext::new()));

		// Act
		let result = adapter.submit(values(), None).await;

		// Assert
		assert_eq!(result, Err(SubmissionError::AuthenticationRequired));
	}

	#[rstest]
	#[case(None, Method::POST, &["farmers"], SubmissionOperation::Create)]
	#[case(Some("f-9"), Method::PUT, &["farmers", "f-9"], SubmissionOperation::Update)]
	#[case(Some("f/9"), Method::PUT, &["farmers", "f/9"], SubmissionOperation::Update)]
	#[tokio::test]
	async fn test_create_or_update(
		#[case] existing: Option<&str>,
		#[case] expected_method: Method,
		#[case] expected_segments: &'static [&'static str],
		#[case] operation: SubmissionOperation,
	) {
		// Arrange
		let mut transport = MockTransport::new();
		transport
			.expect_send_record()
			.withf(move |method, segments, values, token| {
				*method == expected_method
					&& segments.iter().map(String::as_str).eq(expected_segments.iter().copied())
					&& values.len() == 2
					&& token == "jwt"
			})
			.times(1)
			.returning(|_, _, _, _| Ok(json!({"id": "f-9"})));
		let adapter =
			RecordSubmissionAdapter::farmers(transport, Arc::new(SessionContext::with_token("jwt")));

		// Act
		let receipt = adapter
			.submit(values(), existing.map(str::to_string))
			.await
			.unwrap();

		// Assert
		assert_eq!(receipt.operation, operation);
		assert_eq!(receipt.record_id.as_deref(), Some("f-9"));
	}

	#[rstest]
	#[case(ClientError::Status { status: 422, message: "bad".to_string() }, true, false)]
	#[case(ClientError::Status { status: 500, message: "boom".to_string() }, false, true)]
	#[case(ClientError::Network("timed out".to_string()), false, false)]
	#[tokio::test]
	async fn test_transport_failure_kinds(
		#[case] error: ClientError,
		#[case] client_fault: bool,
		#[case] server_fault: bool,
	) {
		let mut transport = MockTransport::new();
		transport
			.expect_send_record()
			.times(1)
			.return_once(move |_, _, _, _| Err(error));
		let adapter =
			RecordSubmissionAdapter::farmers(transport, Arc::new(SessionContext::with_token("jwt")));

		let err = adapter.submit(values(), None).await.unwrap_err();

		match err {
			SubmissionError::SubmissionFailed(failure) => {
				assert_eq!(failure.is_client_fault(), client_fault);
				assert_eq!(failure.is_server_fault(), server_fault);
			}
			other => panic!("Expected SubmissionFailed, got {other:?}"),
		}
	}
}
