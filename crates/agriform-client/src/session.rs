//! Explicit holders for the bearer token and the account-recovery identifier
//!
//! Both contexts are shared through `Arc` between the services that read them.
//! A [`SessionContext`] is established on login and destroyed on logout; a
//! [`RecoveryContext`] lives from the start of a recovery flow until it
//! finishes or is cancelled.

use parking_lot::RwLock;

/// Bearer credential for authenticated calls
///
/// # Examples
///
/// ```
/// use agriform_client::SessionContext;
///
/// let session = SessionContext::new();
/// assert!(!session.is_authenticated());
///
/// session.establish("jwt-token");
/// assert_eq!(session.token().as_deref(), Some("jwt-token"));
///
/// session.destroy();
/// assert!(session.token().is_none());
/// ```
#[derive(Debug, Default)]
pub struct SessionContext {
	token: RwLock<Option<String>>,
}

impl SessionContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// A context that is already authenticated
	pub fn with_token(token: impl Into<String>) -> Self {
		Self {
			token: RwLock::new(Some(token.into())),
		}
	}

	pub fn token(&self) -> Option<String> {
		self.token.read().clone()
	}

	pub fn is_authenticated(&self) -> bool {
		self.token.read().is_some()
	}

	pub fn establish(&self, token: impl Into<String>) {
		*self.token.write() = Some(token.into());
		tracing::info!("Session established");
	}

	pub fn destroy(&self) {
		if self.token.write().take().is_some() {
			tracing::info!("Session destroyed");
		}
	}
}

/// Which identity a recovery flow restores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryKind {
	Password,
	UserId,
}

impl RecoveryKind {
	pub(crate) fn start_path(&self) -> &'static str {
		match self {
			RecoveryKind::Password => "/auth/forgot-password",
			RecoveryKind::UserId => "/auth/forgot-user-id",
		}
	}

	pub(crate) fn resend_path(&self) -> &'static str {
		match self {
			RecoveryKind::Password => "/auth/send-reset-password-otp",
			RecoveryKind::UserId => "/auth/send-userid-otp",
		}
	}

	pub(crate) fn verify_path(&self) -> &'static str {
		match self {
			RecoveryKind::Password => "/auth/verify-reset-password-otp",
			RecoveryKind::UserId => "/auth/verify-userid-otp",
		}
	}
}

/// State of an in-progress recovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryState {
	pub kind: RecoveryKind,
	/// The email address or phone number the code was sent to
	pub identifier: String,
	pub verified: bool,
}

#[derive(Debug, Default)]
pub struct RecoveryContext {
	state: RwLock<Option<RecoveryState>>,
}

impl RecoveryContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn current(&self) -> Option<RecoveryState> {
		self.state.read().clone()
	}

	pub(crate) fn begin(&self, kind: RecoveryKind, identifier: impl Into<String>) {
		*self.state.write() = Some(RecoveryState {
			kind,
			identifier: identifier.into(),
			verified: false,
		});
	}

	pub(crate) fn mark_verified(&self) {
		if let Some(state) = self.state.write().as_mut() {
			state.verified = true;
		}
	}

	pub fn clear(&self) {
		self.state.write().take();
	}
}
