//! Authenticated API gateway for the FanZone dashboard: bearer attachment, single-flight token
//! refresh, persisted sessions, and typed resource calls in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod obs;
pub mod session;
pub mod storage;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers shared by unit and integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::GatewayConfig,
		gateway::ReqwestGateway,
		http::ReqwestTransport,
		storage::{MemoryStorage, SessionStorage},
	};

	/// Builds a reqwest transport suitable for talking to `httpmock` servers.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.no_proxy()
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Constructs a [`ReqwestGateway`] pointed at `base_url` and backed by a fresh in-memory
	/// storage.
	pub fn build_reqwest_test_gateway(base_url: &str) -> (ReqwestGateway, Arc<MemoryStorage>) {
		let storage = Arc::new(MemoryStorage::default());
		let gateway = build_reqwest_test_gateway_with_storage(base_url, storage.clone());

		(gateway, storage)
	}

	/// Constructs a [`ReqwestGateway`] that restores its session from `storage`.
	pub fn build_reqwest_test_gateway_with_storage(
		base_url: &str,
		storage: Arc<MemoryStorage>,
	) -> ReqwestGateway {
		let config = GatewayConfig::new(base_url).expect("Test base URL should be valid.");
		let storage: Arc<dyn SessionStorage> = storage;

		ReqwestGateway::with_transport(config, storage, test_reqwest_transport())
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::OnceCell as AsyncOnceCell;
	pub use ::http::{
		HeaderMap, Method, StatusCode,
		header::{HeaderName, HeaderValue},
	};
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
