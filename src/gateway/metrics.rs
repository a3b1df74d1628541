// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for gateway traffic and refresh exchanges.
#[derive(Debug, Default)]
pub struct GatewayMetrics {
	requests: AtomicU64,
	retries: AtomicU64,
	exchanges: AtomicU64,
	refresh_success: AtomicU64,
	refresh_failure: AtomicU64,
	teardowns: AtomicU64,
}
impl GatewayMetrics {
	/// Returns the number of requests passed to
	/// [`Gateway::execute`](crate::gateway::Gateway::execute).
	pub fn requests(&self) -> u64 {
		self.requests.load(Ordering::Relaxed)
	}

	/// Returns the number of requests replayed after a refresh.
	pub fn retries(&self) -> u64 {
		self.retries.load(Ordering::Relaxed)
	}

	/// Returns the number of requests sent to the refresh endpoint.
	pub fn refresh_exchanges(&self) -> u64 {
		self.exchanges.load(Ordering::Relaxed)
	}

	/// Returns the number of exchanges that produced a new access token.
	pub fn refresh_successes(&self) -> u64 {
		self.refresh_success.load(Ordering::Relaxed)
	}

	/// Returns the number of exchanges that failed.
	pub fn refresh_failures(&self) -> u64 {
		self.refresh_failure.load(Ordering::Relaxed)
	}

	/// Returns the number of times a held session was torn down.
	pub fn session_teardowns(&self) -> u64 {
		self.teardowns.load(Ordering::Relaxed)
	}

	pub(crate) fn record_request(&self) {
		self.requests.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_retry(&self) {
		self.retries.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_exchange(&self) {
		self.exchanges.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_success(&self) {
		self.refresh_success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_failure(&self) {
		self.refresh_failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_teardown(&self) {
		self.teardowns.fetch_add(1, Ordering::Relaxed);
	}
}
