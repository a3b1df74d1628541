//! Login, registration, and logout.

// self
use crate::{
	_prelude::*,
	api::Acknowledgement,
	auth::{CurrentUser, TokenSecret},
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";
const REGISTER_PATH: &str = "/auth/register";
const REGISTER_ADMIN_PATH: &str = "/super-admin/register-admin";

/// Credentials submitted to the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
	/// Account e-mail.
	pub email: String,
	/// Plain-text password; only ever sent over the wire.
	pub password: String,
}
impl LoginRequest {
	/// Creates a login request.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Token pair and profile issued by a successful login.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
	/// Short-lived bearer token.
	pub access_token: TokenSecret,
	/// Long-lived token exchanged for new access tokens.
	pub refresh_token: TokenSecret,
	/// Signed-in account, when the server includes it.
	#[serde(default)]
	pub user: Option<CurrentUser>,
}

/// Self-service account registration.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
	/// Display name.
	pub name: String,
	/// Login e-mail.
	pub email: String,
	/// Plain-text password (at least six characters server-side).
	pub password: String,
	/// Preferred content language.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	/// Favorite club identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fav_club_id: Option<String>,
}
impl Debug for RegisterRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterRequest")
			.field("name", &self.name)
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("language", &self.language)
			.field("fav_club_id", &self.fav_club_id)
			.finish()
	}
}

/// Admin account created by a super admin.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterAdminRequest {
	/// Display name.
	pub name: String,
	/// Login e-mail.
	pub email: String,
	/// Plain-text password.
	pub password: String,
}
impl Debug for RegisterAdminRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterAdminRequest")
			.field("name", &self.name)
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

#[derive(Serialize)]
struct LogoutRequest<'a> {
	refresh_token: &'a str,
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Exchanges credentials for a token pair and stores it in the session.
	///
	/// The call bypasses refresh handling: a 401 here means the credentials were rejected and
	/// surfaces as [`Error::Unauthorized`] without touching the session.
	pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
		const KIND: CallKind = CallKind::Login;

		let span = CallSpan::new(KIND, "login");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let request = ApiRequest::post(LOGIN_PATH).with_json(credentials)?;
				let response: LoginResponse = self.dispatch(&request, None).await?.json()?;

				self.session.set_credentials(
					response.access_token.clone(),
					response.refresh_token.clone(),
					response.user.clone(),
				);

				Ok::<_, Error>(response)
			})
			.await;

		match &result {
			Ok(_) => {
				obs::record_call_outcome(KIND, CallOutcome::Success);

				tracing::debug!("Login succeeded; session stored.");
			},
			Err(e) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);

				tracing::debug!(error = %e, "Login failed.");
			},
		}

		result
	}

	/// Clears the session, then revokes the refresh token server-side.
	///
	/// The session is cleared before the network call and stays cleared whatever the server
	/// answers; a server or transport failure is still returned so callers can report it.
	/// Without a refresh token nothing is sent.
	pub async fn logout(&self) -> Result<()> {
		const KIND: CallKind = CallKind::Logout;

		let span = CallSpan::new(KIND, "logout");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let refresh_token = self.session.refresh_token();

		if self.session.clear() {
			self.metrics.record_teardown();
		}

		let result = match refresh_token {
			Some(token) =>
				span.instrument(async {
					let request = ApiRequest::post(LOGOUT_PATH)
						.with_json(&LogoutRequest { refresh_token: token.expose() })?;

					self.dispatch(&request, None).await?.error_for_status().map(|_| ())
				})
				.await,
			None => Ok(()),
		};

		match &result {
			Ok(()) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(e) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);

				tracing::warn!(
					error = %e,
					"Server-side logout failed; local session already cleared."
				);
			},
		}

		result
	}

	/// Registers a new fan account.
	pub async fn register(&self, request: &RegisterRequest) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::post(REGISTER_PATH), request).await
	}

	/// Creates an admin account; requires a super-admin session.
	pub async fn register_admin(&self, request: &RegisterAdminRequest) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::post(REGISTER_ADMIN_PATH), request).await
	}
}
