//! Forgotten password and user-id recovery

use crate::error::{ClientError, ClientResult};
use crate::session::{RecoveryContext, RecoveryKind, RecoveryState};
use crate::transport::ApiClient;
use agriform_forms::validators::PatternValidator;
use serde_json::json;
use std::sync::Arc;

/// Drives a recovery flow: request a code, verify it, then finish.
///
/// The identifier the code was sent to lives in a [`RecoveryContext`] until
/// the flow finishes. A user-id recovery finishes on verification; a
/// password recovery finishes when the new password is set.
pub struct RecoveryFlow {
	client: ApiClient,
	context: Arc<RecoveryContext>,
}

impl RecoveryFlow {
	pub fn new(client: ApiClient, context: Arc<RecoveryContext>) -> Self {
		Self { client, context }
	}

	pub fn context(&self) -> &Arc<RecoveryContext> {
		&self.context
	}

	/// Request a verification code for `email_or_phone`
	pub async fn start(&self, kind: RecoveryKind, email_or_phone: &str) -> ClientResult<()> {
		let identifier = email_or_phone.trim();
		if identifier.is_empty() {
			return Err(ClientError::InvalidInput(
				"Email or phone is required".to_string(),
			));
		}

		self.client
			.post_json(kind.start_path(), &json!({ "emailOrPhone": identifier }))
			.await?;
		self.context.begin(kind, identifier);
		tracing::info!(?kind, "Recovery started");
		Ok(())
	}

	/// Send the code again
	pub async fn resend(&self) -> ClientResult<()> {
		let state = self.in_progress()?;
		self.client
			.post_json(
				state.kind.resend_path(),
				&json!({ "emailOrPhone": state.identifier }),
			)
			.await?;
		Ok(())
	}

	/// Verify the 6-digit code.
	///
	/// Anything but exactly six digits is rejected without a request.
	pub async fn verify(&self, code: &str) -> ClientResult<()> {
		let code = code.trim();
		PatternValidator::otp()
			.with_message("Please enter a valid 6-digit OTP")
			.validate(code)
			.map_err(|e| ClientError::InvalidInput(e.to_string()))?;

		let state = self.in_progress()?;
		self.client
			.post_json(
				state.kind.verify_path(),
				&json!({ "emailOrPhone": state.identifier, "otp": code }),
			)
			.await?;

		match state.kind {
			RecoveryKind::UserId => {
				self.context.clear();
				tracing::info!("User id recovery finished");
			}
			RecoveryKind::Password => self.context.mark_verified(),
		}
		Ok(())
	}

	/// `POST /auth/set-password` after a verified password recovery
	pub async fn set_password(&self, password: &str) -> ClientResult<()> {
		let state = self.in_progress()?;
		if state.kind != RecoveryKind::Password || !state.verified {
			return Err(ClientError::InvalidInput(
				"Verify the code before setting a password".to_string(),
			));
		}

		self.client
			.post_json(
				"/auth/set-password",
				&json!({ "emailOrPhone": state.identifier, "password": password }),
			)
			.await?;
		self.context.clear();
		tracing::info!("Password recovery finished");
		Ok(())
	}

	pub fn cancel(&self) {
		self.context.clear();
	}

	fn in_progress(&self) -> ClientResult<RecoveryState> {
		self.context
			.current()
			.ok_or_else(|| ClientError::InvalidInput("No recovery in progress".to_string()))
	}
}
