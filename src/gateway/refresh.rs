//! Single-flight refresh-token exchange.
//!
//! The gateway keeps one slot holding the in-flight [`RefreshExchange`], if any. The first
//! caller that observes a 401 while the slot is empty fills it synchronously; every later
//! caller clones the same exchange and awaits its outcome instead of issuing a second call to
//! the refresh endpoint. Once resolved, the slot is emptied so the next 401 starts a fresh
//! exchange. A failed exchange clears the session exactly once, unless a login replaced it while
//! the exchange was in flight.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Path of the refresh-token endpoint, relative to the base URL.
pub(crate) const REFRESH_PATH: &str = "/auth/refresh";

/// Result of a refresh exchange, broadcast to every caller that awaited it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
	/// The session holds this access token; waiting requests replay with it.
	Refreshed(TokenSecret),
	/// The exchange failed; the session it was made for was cleared.
	Failed {
		/// Human-readable failure description.
		reason: String,
	},
}
impl RefreshOutcome {
	fn failed(reason: impl Into<String>) -> Self {
		Self::Failed { reason: reason.into() }
	}
}

/// One logical refresh exchange; resolved at most once.
#[derive(Debug, Default)]
pub(crate) struct RefreshExchange {
	outcome: AsyncOnceCell<RefreshOutcome>,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
	refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
	access_token: TokenSecret,
	#[serde(default)]
	refresh_token: Option<TokenSecret>,
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Returns `true` while a refresh exchange is in flight.
	pub fn refresh_in_flight(&self) -> bool {
		self.exchange_slot.lock().is_some()
	}

	/// Waits for the in-flight exchange, if any, without starting a new one.
	pub(crate) async fn wait_for_exchange(&self) {
		let in_flight = self.exchange_slot.lock().clone();

		if let Some(exchange) = in_flight {
			self.join_exchange(exchange).await;
		}
	}

	/// Joins or starts the exchange after a request sent with `sent_with` got a 401.
	pub(crate) async fn recover_from_unauthorized(
		&self,
		sent_with: Option<&TokenSecret>,
	) -> RefreshOutcome {
		let exchange = {
			let mut slot = self.exchange_slot.lock();

			match slot.as_ref() {
				Some(exchange) => exchange.clone(),
				None => {
					// The session moved on since this request was sent; replay with the new token.
					if let Some(current) =
						self.session.access_token().filter(|current| Some(current) != sent_with)
					{
						return RefreshOutcome::Refreshed(current);
					}

					let exchange = Arc::new(RefreshExchange::default());

					*slot = Some(exchange.clone());

					exchange
				},
			}
		};

		self.join_exchange(exchange).await
	}

	async fn join_exchange(&self, exchange: Arc<RefreshExchange>) -> RefreshOutcome {
		// Whichever waiter polls first drives the exchange; a dropped driver hands over to the
		// next waiter instead of leaving the cell unresolved.
		let outcome = exchange.outcome.get_or_init(|| self.run_exchange()).await.clone();
		let mut slot = self.exchange_slot.lock();

		if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, &exchange)) {
			*slot = None;
		}

		outcome
	}

	async fn run_exchange(&self) -> RefreshOutcome {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh_exchange");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let exchanged = self.session.refresh_token();
		let outcome = span.instrument(self.exchange_refresh_token(exchanged.as_ref())).await;

		match &outcome {
			RefreshOutcome::Refreshed(_) => {
				self.metrics.record_refresh_success();
				obs::record_call_outcome(KIND, CallOutcome::Success);

				tracing::debug!("Access token refreshed.");
			},
			RefreshOutcome::Failed { reason } => {
				self.metrics.record_refresh_failure();
				obs::record_call_outcome(KIND, CallOutcome::Failure);

				// A session replaced by a login during the exchange is not ours to tear down.
				if self.session.clear_if_current(exchanged.as_ref()) {
					self.metrics.record_teardown();
				}

				tracing::warn!(%reason, "Token refresh failed; session cleared.");
			},
		}

		outcome
	}

	async fn exchange_refresh_token(&self, exchanged: Option<&TokenSecret>) -> RefreshOutcome {
		let Some(refresh_token) = exchanged else {
			return RefreshOutcome::failed("No refresh token is available");
		};

		self.metrics.record_exchange();

		let request = match ApiRequest::post(REFRESH_PATH)
			.with_json(&RefreshRequest { refresh_token: refresh_token.expose() })
		{
			Ok(request) => request,
			Err(e) => return RefreshOutcome::failed(format!("Refresh request is invalid: {e}")),
		};
		let response = match self.dispatch(&request, None).await {
			Ok(response) => response,
			Err(e) => return RefreshOutcome::failed(format!("Refresh request failed: {e}")),
		};

		if !response.is_success() {
			return RefreshOutcome::failed(format!(
				"Refresh endpoint responded with {}: {}",
				response.status.as_u16(),
				response.error_message()
			));
		}

		let RefreshResponse { access_token, refresh_token: rotated } = match response.json() {
			Ok(body) => body,
			Err(e) => return RefreshOutcome::failed(format!("Refresh response is invalid: {e}")),
		};

		if access_token.expose().is_empty() {
			return RefreshOutcome::failed("Refresh response carried an empty access token");
		}
		if !self.session.update_access_token(refresh_token, access_token.clone(), rotated) {
			// A login finished while the exchange was in flight; replay with its credentials.
			if let Some(current) = self.session.access_token() {
				tracing::debug!("Session was replaced during the refresh; new token discarded.");

				return RefreshOutcome::Refreshed(current);
			}

			return RefreshOutcome::failed("Session was cleared while the refresh was in flight");
		}

		RefreshOutcome::Refreshed(access_token)
	}
}
