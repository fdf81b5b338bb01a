//! Login, registration and profile calls

use crate::error::{ClientError, ClientResult};
use crate::transport::ApiClient;
use agriform_forms::FormValueMap;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
	user_name: &'a str,
	password: &'a str,
}

/// Result of a login attempt that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
	/// A token was issued and the session established
	Authenticated,
	/// The server refused the credentials or issued no token
	Rejected { reason: String },
}

impl LoginOutcome {
	pub fn is_authenticated(&self) -> bool {
		matches!(self, LoginOutcome::Authenticated)
	}
}

/// Identity calls bound to the client's session
pub struct AuthService {
	client: ApiClient,
}

impl AuthService {
	pub fn new(client: ApiClient) -> Self {
		Self { client }
	}

	/// `POST /auth/login`; a token in the response establishes the session.
	///
	/// 400, 401 and 403 answers are rejections rather than errors.
	pub async fn login(&self, user_name: &str, password: &str) -> ClientResult<LoginOutcome> {
		let request = LoginRequest {
			user_name,
			password,
		};

		let response = match self.client.post_json("/auth/login", &request).await {
			Ok(response) => response,
			Err(ClientError::Status { status, message }) if matches!(status, 400 | 401 | 403) => {
				tracing::info!(status, "Login rejected");
				return Ok(LoginOutcome::Rejected { reason: message });
			}
			Err(e) => return Err(e),
		};

		match response.get("token").and_then(Value::as_str) {
			Some(token) if !token.is_empty() => {
				self.client.session().establish(token);
				Ok(LoginOutcome::Authenticated)
			}
			_ => {
				tracing::warn!("Login response carried no token");
				Ok(LoginOutcome::Rejected {
					reason: "Token missing in response".to_string(),
				})
			}
		}
	}

	/// Login with the values of the login form
	pub async fn login_with(&self, values: &FormValueMap) -> ClientResult<LoginOutcome> {
		let user_name = values.get("userName").map(|v| v.to_text()).unwrap_or_default();
		let password = values.get("password").map(|v| v.to_text()).unwrap_or_default();
		self.login(user_name.trim(), &password).await
	}

	pub fn logout(&self) {
		self.client.session().destroy();
	}

	/// `POST /auth/register`
	///
	/// The confirmation field stays client-side.
	pub async fn register(&self, values: &FormValueMap) -> ClientResult<Value> {
		let mut values = values.clone();
		values.remove("confirmPassword");
		self.client.post_json("/auth/register", &values.to_json()).await
	}

	/// `GET /user/profile` for the logged-in user
	pub async fn profile(&self) -> ClientResult<Value> {
		if !self.client.session().is_authenticated() {
			return Err(ClientError::Unauthenticated);
		}
		self.client.get_json("/user/profile").await
	}
}
