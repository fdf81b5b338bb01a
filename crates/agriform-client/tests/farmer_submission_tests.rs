//! Farmer submissions over HTTP
//!
//! Runs the farmer wizard against a mock registry API through the real
//! reqwest transport.

use agriform_client::{
	ApiClient, HttpRecordTransport, MemoryBlobStore, RecordSubmissionAdapter, SessionContext,
};
use agriform_conf::ApiSettings;
use agriform_forms::{
	FileRef, FormSubmitter, FormValueMap, StepOutcome, StepValidator, SubmissionError,
	SubmissionOperation, WizardController, WizardError, catalog,
};
use chrono::NaiveDate;
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Adapter = RecordSubmissionAdapter<HttpRecordTransport>;

#[fixture]
fn validator() -> StepValidator {
	StepValidator::new().with_today(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
}

fn adapter(server: &MockServer, session: Arc<SessionContext>, blobs: Arc<MemoryBlobStore>) -> Adapter {
	let settings = ApiSettings {
		base_url: format!("{}/api", server.uri()),
		timeout_secs: 5,
	};
	let client = ApiClient::new(&settings, Arc::clone(&session)).expect("Failed to build client");
	RecordSubmissionAdapter::farmers(HttpRecordTransport::new(client, blobs), session)
}

fn text_values() -> FormValueMap {
	[
		("firstName", "Ravi"),
		("lastName", "Reddy"),
		("pincode", "506001"),
	]
	.into_iter()
	.collect()
}

#[rstest]
#[tokio::test]
async fn test_json_create_with_bearer() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/farmers"))
		.and(header("authorization", "Bearer jwt"))
		.and(body_partial_json(json!({"firstName": "Ravi", "pincode": "506001"})))
		.respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "f-1"})))
		.expect(1)
		.mount(&server)
		.await;
	let adapter = adapter(
		&server,
		Arc::new(SessionContext::with_token("jwt")),
		Arc::new(MemoryBlobStore::new()),
	);

	// Act
	let receipt = adapter.submit(text_values(), None).await.unwrap();

	// Assert
	assert_eq!(receipt.operation, SubmissionOperation::Create);
	assert_eq!(receipt.record_id.as_deref(), Some("f-1"));
}

#[rstest]
#[tokio::test]
async fn test_update_uses_put() {
	let server = MockServer::start().await;
	Mock::given(method("PUT"))
		.and(path("/api/farmers/f-1"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "f-1"})))
		.expect(1)
		.mount(&server)
		.await;
	let adapter = adapter(
		&server,
		Arc::new(SessionContext::with_token("jwt")),
		Arc::new(MemoryBlobStore::new()),
	);

	let receipt = adapter
		.submit(text_values(), Some("f-1".to_string()))
		.await
		.unwrap();

	assert_eq!(receipt.operation, SubmissionOperation::Update);
}

#[rstest]
#[tokio::test]
async fn test_plain_text_success_is_accepted() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/farmers"))
		.respond_with(ResponseTemplate::new(201).set_body_string("Farmer saved successfully"))
		.expect(1)
		.mount(&server)
		.await;
	let adapter = adapter(
		&server,
		Arc::new(SessionContext::with_token("jwt")),
		Arc::new(MemoryBlobStore::new()),
	);

	// Act
	let receipt = adapter.submit(text_values(), None).await.unwrap();

	// Assert
	assert_eq!(receipt.operation, SubmissionOperation::Create);
	assert_eq!(receipt.record_id, None);
}

#[rstest]
#[case("f/1", "/api/farmers/f%2F1")]
#[case("../users/1", "/api/farmers/..%2Fusers%2F1")]
#[case("f-1?admin=1", "/api/farmers/f-1%3Fadmin=1")]
#[tokio::test]
async fn test_record_id_stays_in_its_segment(#[case] id: &str, #[case] expected_path: &str) {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("PUT"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": id})))
		.expect(1)
		.mount(&server)
		.await;
	let adapter = adapter(
		&server,
		Arc::new(SessionContext::with_token("jwt")),
		Arc::new(MemoryBlobStore::new()),
	);

	// Act
	adapter
		.submit(text_values(), Some(id.to_string()))
		.await
		.unwrap();

	// Assert
	let requests = server.received_requests().await.unwrap();
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].url.path(), expected_path);
	assert_eq!(requests[0].url.query(), None);
}

#[rstest]
#[tokio::test]
async fn test_files_are_sent_as_multipart() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/farmers"))
		.and(header_regex("content-type", "^multipart/form-data"))
		.respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "f-2"})))
		.expect(1)
		.mount(&server)
		.await;
	let blobs = Arc::new(MemoryBlobStore::new());
	blobs.insert("blob-7", b"%PDF-1.7 passbook".to_vec());
	let adapter = adapter(&server, Arc::new(SessionContext::with_token("jwt")), blobs);
	let mut values = text_values();
	values.set(
		"passbookFile",
		FileRef::new("blob-7", "passbook.pdf", "application/pdf", 17),
	);

	// Act
	adapter.submit(values, None).await.unwrap();

	// Assert
	let requests = server.received_requests().await.unwrap();
	let body = String::from_utf8_lossy(&requests[0].body);
	assert!(body.contains("name=\"passbookFile\"; filename=\"passbook.pdf\""));
	assert!(body.contains("%PDF-1.7 passbook"));
	assert!(body.contains("name=\"firstName\""));
}

#[rstest]
#[tokio::test]
async fn test_no_session_sends_nothing() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(201))
		.expect(0)
		.mount(&server)
		.await;
	let adapter = adapter(
		&server,
		Arc::new(SessionContext::new()),
		Arc::new(MemoryBlobStore::new()),
	);

	let result = adapter.submit(text_values(), None).await;

	assert_eq!(result.unwrap_err(), SubmissionError::AuthenticationRequired);
}

#[rstest]
#[case(400, true)]
#[case(500, false)]
#[tokio::test]
async fn test_failure_is_not_retried(#[case] status: u16, #[case] client_fault: bool) {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/farmers"))
		.respond_with(ResponseTemplate::new(status).set_body_json(json!({"message": "rejected"})))
		.expect(1)
		.mount(&server)
		.await;
	let adapter = adapter(
		&server,
		Arc::new(SessionContext::with_token("jwt")),
		Arc::new(MemoryBlobStore::new()),
	);

	let err = adapter.submit(text_values(), None).await.unwrap_err();

	let SubmissionError::SubmissionFailed(failure) = err else {
		panic!("Expected SubmissionFailed");
	};
	assert_eq!(failure.is_client_fault(), client_fault);
	assert_eq!(failure.status(), Some(status));
}

#[rstest]
#[tokio::test]
async fn test_farmer_wizard_submits_once_over_http(validator: StepValidator) {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/farmers"))
		.and(header("authorization", "Bearer jwt"))
		.respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "f-100"})))
		.expect(1)
		.mount(&server)
		.await;
	let blobs = Arc::new(MemoryBlobStore::new());
	blobs.insert("doc-1", b"aadhar scan".to_vec());
	let session = Arc::new(SessionContext::new());
	let mut wizard = WizardController::new(
		catalog::farmer(),
		adapter(&server, Arc::clone(&session), blobs),
	)
	.with_validator(validator);

	for (name, value) in [
		("salutation", "Mr."),
		("firstName", "Ravi"),
		("lastName", "Reddy"),
		("gender", "Male"),
		("nationality", "Indian"),
		("dateOfBirth", "1985-04-12"),
	] {
		wizard.set_field(name, value);
	}
	assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 1 });

	for (name, value) in [
		("country", "India"),
		("state", "Telangana"),
		("district", "Warangal"),
		("mandal", "Hanamkonda"),
		("village", "Kazipet"),
		("pincode", "50600"),
	] {
		wizard.set_field(name, value);
	}
	assert!(matches!(
		wizard.next().await,
		Err(WizardError::StepInvalid { step: 1, .. })
	));
	assert!(wizard.error("pincode").unwrap().contains("6-digit"));
	wizard.set_field("pincode", "506001");

	wizard.set_field("soilTest", "No");
	wizard.set_field("accountNumber", "123456789012");
	wizard.set_field("ifscCode", "SBIN0001234");
	wizard.set_field("documentType", "aadharNumber");
	wizard.set_field("aadharNumber", "123412341234");
	wizard.set_field(
		"documentFile",
		FileRef::new("doc-1", "aadhar.pdf", "application/pdf", 11),
	);

	// Act: without a session the submission is blocked
	wizard.jump_to(7).unwrap();
	let blocked = wizard.next().await;

	// Act: log in and submit
	session.establish("jwt");
	let outcome = wizard.next().await.unwrap();

	// Assert
	assert!(matches!(
		blocked,
		Err(WizardError::Submission(SubmissionError::AuthenticationRequired))
	));
	let StepOutcome::Submitted(receipt) = outcome else {
		panic!("Expected submission");
	};
	assert_eq!(receipt.record_id.as_deref(), Some("f-100"));
	assert_eq!(wizard.current_step(), 0);
}
