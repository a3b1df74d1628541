//! Transport primitives for API calls.
//!
//! The module exposes [`ApiRequest`] (a path-relative call description that the gateway can
//! replay), [`HttpRequest`] (the fully resolved form handed to a transport), [`ApiResponse`],
//! and the [`HttpTransport`] trait so downstream crates can plug in custom HTTP stacks. The
//! gateway owns credential handling; transports only move bytes.

// std
use std::ops::Deref;
// crates.io
use ::http::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, DecodeError, TransportError},
};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing gateway requests.
///
/// Implementations must return every HTTP response as `Ok`, whatever its status; only
/// failures to obtain a response (DNS, TCP, TLS, timeouts) are errors. The gateway relies on
/// seeing 401 responses to drive its refresh flow.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` and buffers the response body.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Outbound API call described relative to the gateway's base URL.
///
/// Requests are cheap to clone so the gateway can replay them after a token refresh.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path appended to the base URL, e.g. `/clubs`.
	pub path: String,
	/// Query parameters in insertion order.
	pub query: Vec<(String, String)>,
	/// Extra headers; `Authorization` is managed by the gateway and overwritten.
	pub headers: HeaderMap,
	/// Optional JSON body.
	pub body: Option<serde_json::Value>,
}
impl ApiRequest {
	/// Creates a request without query, headers, or body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			headers: HeaderMap::new(),
			body: None,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Shorthand for a `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::PUT, path)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Appends a query parameter.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Appends a query parameter only when `value` is present.
	pub fn with_optional_query(
		self,
		key: impl Into<String>,
		value: Option<impl Into<String>>,
	) -> Self {
		match value {
			Some(value) => self.with_query(key, value),
			None => self,
		}
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn with_json(mut self, body: &(impl ?Sized + Serialize)) -> Result<Self, ConfigError> {
		let value =
			serde_json::to_value(body).map_err(|source| ConfigError::RequestEncode { source })?;

		self.body = Some(value);

		Ok(self)
	}

	/// Resolves the request against `base` and attaches `bearer` when present.
	pub(crate) fn resolve(
		&self,
		base: &Url,
		bearer: Option<&TokenSecret>,
	) -> Result<HttpRequest, ConfigError> {
		let mut url = endpoint_url(base, &self.path)?;

		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(self.query.iter());
		}

		let mut headers = self.headers.clone();

		headers.remove(AUTHORIZATION);

		if let Some(token) = bearer {
			let mut value = HeaderValue::from_str(&token.bearer())
				.map_err(|_| ConfigError::InvalidCredential)?;

			value.set_sensitive(true);
			headers.insert(AUTHORIZATION, value);
		}

		let body = match &self.body {
			Some(value) => {
				let bytes = serde_json::to_vec(value)
					.map_err(|source| ConfigError::RequestEncode { source })?;

				headers
					.entry(CONTENT_TYPE)
					.or_insert(HeaderValue::from_static("application/json"));

				Some(bytes)
			},
			None => None,
		};

		Ok(HttpRequest { method: self.method.clone(), url, headers, body })
	}
}

/// Fully resolved request handed to an [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL including query.
	pub url: Url,
	/// Headers, including `Authorization` when a token was attached.
	pub headers: HeaderMap,
	/// Encoded body bytes.
	pub body: Option<Vec<u8>>,
}
impl HttpRequest {
	/// Returns the bearer token carried by the request, if any.
	pub fn bearer_token(&self) -> Option<&str> {
		self.headers.get(AUTHORIZATION)?.to_str().ok()?.strip_prefix("Bearer ")
	}
}

/// Buffered HTTP response returned by the gateway.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response with empty headers.
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: HeaderMap::new(), body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Returns `true` for 401 responses.
	pub fn is_unauthorized(&self) -> bool {
		self.status == StatusCode::UNAUTHORIZED
	}

	/// Extracts the server's `error` or `message` field, falling back to the status reason.
	pub fn error_message(&self) -> String {
		#[derive(Deserialize)]
		struct ErrorBody {
			error: Option<String>,
			message: Option<String>,
		}

		serde_json::from_slice::<ErrorBody>(&self.body)
			.ok()
			.and_then(|body| body.error.or(body.message))
			.filter(|message| !message.is_empty())
			.unwrap_or_else(|| {
				self.status.canonical_reason().unwrap_or("Unknown status").to_owned()
			})
	}

	/// Converts non-2xx responses into [`Error::Unauthorized`] (401) or [`Error::Api`].
	pub fn error_for_status(self) -> Result<Self> {
		if self.is_success() {
			return Ok(self);
		}
		if self.is_unauthorized() {
			return Err(Error::Unauthorized { reason: self.error_message() });
		}

		Err(Error::Api { status: self.status.as_u16(), message: self.error_message() })
	}

	/// Checks the status and decodes the JSON body into `T`.
	pub fn json<T>(self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.error_for_status()?;
		let mut de = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(&mut de).map_err(|source| {
			DecodeError::Json { source, status: response.status.as_u16() }.into()
		})
	}
}

/// Joins a request path onto the base URL's path, keeping the base prefix (e.g. `/api`).
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, ConfigError> {
	let trimmed = path.trim_start_matches('/');

	if trimmed.contains(['?', '#']) {
		return Err(ConfigError::InvalidEndpoint { path: path.to_owned() });
	}

	let mut url = base.clone();
	let joined = format!("{}/{trimmed}", base.path().trim_end_matches('/'));

	url.set_path(&joined);
	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let HttpRequest { method, url, headers, body } = request;
			let mut builder = self.0.request(method, url).headers(headers);

			if let Some(body) = body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, headers, body })
		})
	}
}
