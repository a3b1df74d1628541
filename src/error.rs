//! Gateway-level error types shared across the session, transport, and resource layers.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session storage failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::storage::StorageError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A successful response body did not match the expected model.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// A resource identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::api::IdentifierError),

	/// The access token was rejected and could not be refreshed; the session has been cleared.
	#[error("Request is not authorized: {reason}.")]
	Unauthorized {
		/// Gateway- or server-supplied reason string.
		reason: String,
	},
	/// The API answered with a non-success status other than an unrecoverable 401.
	#[error("API responded with status {status}: {message}.")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Server-supplied `error`/`message` field, or the canonical status reason.
		message: String,
	},
}
impl Error {
	/// Returns `true` when the error represents an authentication failure.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Unauthorized { .. })
	}

	/// Returns the HTTP status associated with the error, when one exists.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
			Self::Api { status, .. } => Some(*status),
			Self::Decode(DecodeError::Json { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and request-construction failures raised by the gateway.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The configured API base URL cannot be parsed.
	#[error("API base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Raw configured value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The API base URL cannot carry a path (e.g. `mailto:` or `data:` URLs).
	#[error("API base URL `{value}` cannot be used as a base.")]
	CannotBeABase {
		/// Raw configured value.
		value: String,
	},
	/// A request path embeds a query or fragment; use the request's query list instead.
	#[error("Request path `{path}` must not contain a query or fragment.")]
	InvalidEndpoint {
		/// Offending request path.
		path: String,
	},
	/// The access token contains bytes that are not valid in an HTTP header.
	#[error("Access token cannot be sent in an Authorization header.")]
	InvalidCredential,
	/// Request body could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	RequestEncode {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// The response body is not valid JSON for the expected model.
	#[error("API returned malformed JSON at `{path}`.", path = .source.path())]
	Json {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the decoded response.
		status: u16,
	},
}
