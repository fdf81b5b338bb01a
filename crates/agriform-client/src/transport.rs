//! reqwest-backed client for the registry API

use crate::blob::BlobStore;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionContext;
use agriform_conf::ApiSettings;
use agriform_forms::{FieldValue, FormValueMap};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Client for the registry API.
///
/// Every request carries the session's bearer token when one is present.
/// Requests time out after the configured duration and are never retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
	base_url: Url,
	client: reqwest::Client,
	session: Arc<SessionContext>,
}

impl ApiClient {
	/// Create a client from API settings
	///
	/// # Examples
	///
	/// ```
	/// use agriform_client::{ApiClient, SessionContext};
	/// use agriform_conf::ApiSettings;
	/// use std::sync::Arc;
	///
	/// let client = ApiClient::new(&ApiSettings::default(), Arc::new(SessionContext::new())).unwrap();
	/// assert_eq!(
	///     client.endpoint("/farmers").unwrap().as_str(),
	///     "http://localhost:8080/api/farmers"
	/// );
	/// ```
	pub fn new(settings: &ApiSettings, session: Arc<SessionContext>) -> ClientResult<Self> {
		let client = reqwest::Client::builder()
			.timeout(settings.timeout())
			.build()
			.map_err(|e| ClientError::Configuration(format!("Failed to create client: {}", e)))?;

		Ok(Self {
			base_url: Url::parse(settings.base_url.trim_end_matches('/'))?,
			client,
			session,
		})
	}

	pub fn session(&self) -> &Arc<SessionContext> {
		&self.session
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Resolve `path` below the base URL
	pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
		let url = format!(
			"{}/{}",
			self.base_url.as_str().trim_end_matches('/'),
			path.trim_start_matches('/')
		);
		Ok(Url::parse(&url)?)
	}

	/// Resolve `segments` below the base URL, percent-encoding each one.
	///
	/// Empty, `.` and `..` segments are rejected.
	pub fn endpoint_segments(&self, segments: &[&str]) -> ClientResult<Url> {
		if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
			return Err(ClientError::InvalidInput(format!(
				"Invalid path segment '{}'",
				bad
			)));
		}

		let mut url = self.base_url.clone();
		url.path_segments_mut()
			.map_err(|_| ClientError::Configuration("Base URL cannot hold a path".to_string()))?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	pub async fn get_json(&self, path: &str) -> ClientResult<Value> {
		let url = self.endpoint(path)?;
		self.execute(self.request(Method::GET, url), None).await
	}

	pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
		let url = self.endpoint(path)?;
		self.execute(self.request(Method::POST, url).json(body), None)
			.await
	}

	/// Send a `GET` to a pre-built URL
	pub async fn get_url(&self, url: Url) -> ClientResult<Value> {
		self.execute(self.request(Method::GET, url), None).await
	}

	/// Send form values to `url`, as multipart when any value is a file
	///
	/// File parts are read from `blobs`. Nested dot-path names are expanded
	/// into objects for JSON bodies and kept flat for multipart fields.
	pub async fn send_form(
		&self,
		method: Method,
		url: Url,
		values: &FormValueMap,
		blobs: &dyn BlobStore,
		bearer: Option<&str>,
	) -> ClientResult<Value> {
		let builder = self.request(method, url);
		let builder = if values.has_files() {
			builder.multipart(multipart_form(values, blobs).await?)
		} else {
			builder.json(&values.to_json())
		};
		self.execute(builder, bearer).await
	}

	fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
		tracing::debug!(%method, path = url.path(), "API request");
		self.client.request(method, url)
	}

	async fn execute(
		&self,
		builder: reqwest::RequestBuilder,
		bearer: Option<&str>,
	) -> ClientResult<Value> {
		let builder = match bearer.map(str::to_string).or_else(|| self.session.token()) {
			Some(token) => builder.bearer_auth(token),
			None => builder,
		};

		let response = builder.send().await.map_err(|e| {
			tracing::warn!(error = %e, "API request failed before a response");
			ClientError::from(e)
		})?;

		let status = response.status();
		tracing::debug!(status = status.as_u16(), path = response.url().path(), "API response");

		if !status.is_success() {
			let message = response
				.text()
				.await
				.unwrap_or_else(|_| "Unknown error".to_string());
			return Err(ClientError::Status {
				status: status.as_u16(),
				message: error_message(&message),
			});
		}

		let text = response.text().await?;
		Ok(success_body(text))
	}
}

/// Any 2xx counts as success; a body that is not JSON is kept as a string
fn success_body(text: String) -> Value {
	if text.trim().is_empty() {
		return Value::Null;
	}
	serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// Prefer the `message` field of a JSON error body
fn error_message(body: &str) -> String {
	serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
		.unwrap_or_else(|| body.to_string())
}

async fn multipart_form(values: &FormValueMap, blobs: &dyn BlobStore) -> ClientResult<Form> {
	let mut entries: Vec<_> = values.iter().collect();
	entries.sort_by(|a, b| a.0.cmp(b.0));

	let mut form = Form::new();
	for (name, value) in entries {
		form = match value {
			FieldValue::Null => form,
			FieldValue::File(file) => {
				let bytes = blobs.read(file).await?;
				let part = Part::bytes(bytes)
					.file_name(file.file_name.clone())
					.mime_str(&file.content_type)?;
				form.part(name.clone(), part)
			}
			FieldValue::List(items) => items
				.iter()
				.fold(form, |form, item| form.text(name.clone(), item.clone())),
			other => form.text(name.clone(), other.to_text().into_owned()),
		};
	}
	Ok(form)
}
