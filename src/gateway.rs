//! Authenticated request gateway.
//!
//! [`Gateway::execute`] attaches the session's bearer token, dispatches the request, and on a
//! 401 joins (or starts) the single in-flight refresh exchange before replaying the request
//! once with the new access token. Non-401 outcomes are returned unmodified.

mod metrics;
mod refresh;

pub use metrics::GatewayMetrics;
pub use refresh::RefreshOutcome;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::GatewayConfig,
	http::{ApiRequest, ApiResponse, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::SessionState,
	storage::SessionStorage,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = Gateway<ReqwestTransport>;

/// Wraps an HTTP transport with session-aware credential handling.
///
/// Clones share the transport, the session, the metrics, and the refresh slot, so every clone
/// participates in the same single-flight refresh.
pub struct Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound request.
	pub transport: Arc<T>,
	/// Base URL and transport settings.
	pub config: GatewayConfig,
	/// Session read for bearer tokens and mutated by login, refresh, and logout.
	pub session: Arc<SessionState>,
	/// Shared counters for requests, retries, and refresh exchanges.
	pub metrics: Arc<GatewayMetrics>,
	exchange_slot: Arc<Mutex<Option<Arc<refresh::RefreshExchange>>>>,
}
impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a gateway whose session is restored from `storage`.
	pub fn with_transport(
		config: GatewayConfig,
		storage: Arc<dyn SessionStorage>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		let session = {
			let _span = CallSpan::new(CallKind::Request, "restore_session").entered();

			SessionState::restore(storage)
		};

		Self::with_session(config, Arc::new(session), transport)
	}

	/// Creates a gateway around an existing session.
	pub fn with_session(
		config: GatewayConfig,
		session: Arc<SessionState>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			config,
			session,
			metrics: Default::default(),
			exchange_slot: Default::default(),
		}
	}

	/// Executes `request` with the current credentials, recovering from one expired token.
	///
	/// - If a refresh exchange is in flight, the request waits for it before dispatching.
	/// - A 401 response joins the in-flight exchange or starts one; on success the request is
	///   replayed once with the new access token and that response is returned as final.
	/// - If the exchange fails, the session is cleared and [`Error::Unauthorized`] is returned.
	/// - Every other response, including non-2xx statuses, is returned unmodified.
	pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "execute");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.execute_with_recovery(request)).await;

		match &result {
			Ok(response) if response.is_success() =>
				obs::record_call_outcome(KIND, CallOutcome::Success),
			_ => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Executes `request` and decodes a 2xx JSON body into `R`.
	pub async fn fetch<R>(&self, request: ApiRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.execute(request).await?.json()
	}

	async fn execute_with_recovery(&self, request: ApiRequest) -> Result<ApiResponse> {
		self.metrics.record_request();
		self.wait_for_exchange().await;

		let sent_with = self.session.access_token();
		let response = self.dispatch(&request, sent_with.as_ref()).await?;

		if !response.is_unauthorized() {
			return Ok(response);
		}

		tracing::debug!(
			method = %request.method,
			path = %request.path,
			"Request was rejected with 401."
		);

		match self.recover_from_unauthorized(sent_with.as_ref()).await {
			RefreshOutcome::Refreshed(token) => {
				self.metrics.record_retry();

				self.dispatch(&request, Some(&token)).await
			},
			RefreshOutcome::Failed { reason } => Err(Error::Unauthorized { reason }),
		}
	}

	/// Resolves and sends `request` exactly once, attaching `bearer` when present.
	pub(crate) async fn dispatch(
		&self,
		request: &ApiRequest,
		bearer: Option<&TokenSecret>,
	) -> Result<ApiResponse> {
		let http_request = request.resolve(self.config.base_url(), bearer)?;

		Ok(self.transport.send(http_request).await?)
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestTransport> {
	/// Creates a gateway with its own reqwest transport and a session restored from `storage`.
	///
	/// Redirects are not followed, so a 401 is always observed by the gateway itself.
	pub fn new(config: GatewayConfig, storage: Arc<dyn SessionStorage>) -> Result<Self> {
		let mut builder = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none());

		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}

		let client = builder.build().map_err(crate::error::ConfigError::from)?;

		Ok(Self::with_transport(config, storage, ReqwestTransport::with_client(client)))
	}
}
impl<T> Clone for Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			config: self.config.clone(),
			session: self.session.clone(),
			metrics: self.metrics.clone(),
			exchange_slot: self.exchange_slot.clone(),
		}
	}
}
impl<T> Debug for Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("base_url", &self.config.base_url().as_str())
			.field("session", &self.session)
			.field("refresh_in_flight", &self.exchange_slot.lock().is_some())
			.finish()
	}
}
