//! Gateway configuration: API base URL resolution and transport settings.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, error::ConfigError, http};

/// Settings shared by every gateway call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
	base_url: Url,
	/// Per-request timeout applied by the default reqwest transport.
	pub timeout: Option<StdDuration>,
}
impl GatewayConfig {
	/// Environment variable holding the API base URL.
	pub const BASE_URL_ENV: &str = "API_BASE_URL";
	/// Environment variable holding the origin used to resolve a relative base URL.
	pub const ORIGIN_ENV: &str = "API_ORIGIN";
	/// Base URL used when none is configured.
	pub const DEFAULT_BASE_URL: &str = "/api";
	/// Origin used when the base URL is relative and no origin is configured.
	pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

	/// Builds a configuration from an absolute base URL, or a relative one resolved against
	/// [`Self::DEFAULT_ORIGIN`].
	pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
		Self::with_origin(base_url, Self::DEFAULT_ORIGIN)
	}

	/// Builds a configuration, resolving a relative `base_url` against `origin`.
	pub fn with_origin(
		base_url: impl AsRef<str>,
		origin: impl AsRef<str>,
	) -> Result<Self, ConfigError> {
		let raw = base_url.as_ref().trim();
		let base_url = match Url::parse(raw) {
			Ok(url) => url,
			Err(url::ParseError::RelativeUrlWithoutBase) => {
				let origin = origin.as_ref().trim();
				let origin = Url::parse(origin).map_err(|source| ConfigError::InvalidBaseUrl {
					value: origin.to_owned(),
					source,
				})?;

				origin.join(raw).map_err(|source| ConfigError::InvalidBaseUrl {
					value: raw.to_owned(),
					source,
				})?
			},
			Err(source) =>
				return Err(ConfigError::InvalidBaseUrl { value: raw.to_owned(), source }),
		};

		if base_url.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { value: raw.to_owned() });
		}

		Ok(Self { base_url, timeout: None })
	}

	/// Reads [`Self::BASE_URL_ENV`] and [`Self::ORIGIN_ENV`] from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads settings through `lookup`; empty values count as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let base_url = read(Self::BASE_URL_ENV).unwrap_or_else(|| Self::DEFAULT_BASE_URL.into());
		let origin = read(Self::ORIGIN_ENV).unwrap_or_else(|| Self::DEFAULT_ORIGIN.into());

		Self::with_origin(base_url, origin)
	}

	/// Sets the per-request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Returns the resolved base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Returns the absolute URL for `path` under the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		http::endpoint_url(&self.base_url, path)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
		move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_owned())
	}

	#[test]
	fn defaults_resolve_relative_api_prefix() {
		let config = GatewayConfig::from_lookup(lookup(&[])).expect("Defaults should be valid.");

		assert_eq!(config.base_url().as_str(), "http://localhost:8080/api");
		assert_eq!(
			config.endpoint("/auth/refresh").expect("Endpoint should resolve.").as_str(),
			"http://localhost:8080/api/auth/refresh"
		);
	}

	#[test]
	fn absolute_base_url_ignores_origin() {
		let config = GatewayConfig::from_lookup(lookup(&[
			("API_BASE_URL", "https://api.fanzone.example/v1"),
			("API_ORIGIN", "http://ignored.example"),
		]))
		.expect("Absolute base URL should be valid.");

		assert_eq!(
			config.endpoint("clubs").expect("Endpoint should resolve.").as_str(),
			"https://api.fanzone.example/v1/clubs"
		);
	}

	#[test]
	fn relative_base_url_uses_configured_origin() {
		let config = GatewayConfig::from_lookup(lookup(&[
			("API_BASE_URL", "  "),
			("API_ORIGIN", "https://dashboard.fanzone.example"),
		]))
		.expect("Blank base URL should fall back to the default.");

		assert_eq!(config.base_url().as_str(), "https://dashboard.fanzone.example/api");
	}

	#[test]
	fn invalid_values_are_rejected() {
		assert!(matches!(
			GatewayConfig::with_origin("/api", "not a url"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(
			GatewayConfig::new("mailto:ops@fanzone.example"),
			Err(ConfigError::CannotBeABase { .. })
		));
	}

	#[test]
	fn timeout_is_optional() {
		let config = GatewayConfig::new("/api").expect("Default base URL should be valid.");

		assert_eq!(config.timeout, None);
		assert_eq!(
			config.with_timeout(StdDuration::from_secs(5)).timeout,
			Some(StdDuration::from_secs(5))
		);
	}
}
