//! Durable key/value mirror of the session, standing in for browser local storage.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

// self
use crate::_prelude::*;

/// Storage backend contract used to persist session credentials across restarts.
///
/// Implementations are synchronous, matching the semantics of a browser's local storage:
/// every call completes before returning and there is no partial write visible to readers.
pub trait SessionStorage
where
	Self: Send + Sync,
{
	/// Returns the stored value for `key`, if present.
	fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

	/// Persists or replaces the value for `key`.
	fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

	/// Deletes the value for `key`; removing an absent key is not an error.
	fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}

/// Fixed keys under which session state is persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
	/// Current access token.
	AccessToken,
	/// Current refresh token.
	RefreshToken,
	/// JSON-encoded [`CurrentUser`](crate::auth::CurrentUser).
	User,
}
impl StorageKey {
	/// Every key written by the session store.
	pub const ALL: [Self; 3] = [Self::AccessToken, Self::RefreshToken, Self::User];

	/// Returns the stable storage key name.
	pub const fn as_str(self) -> &'static str {
		match self {
			StorageKey::AccessToken => "token",
			StorageKey::RefreshToken => "refreshToken",
			StorageKey::User => "user",
		}
	}
}
impl Display for StorageKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error type produced by [`SessionStorage`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum StorageError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn storage_error_converts_into_gateway_error_with_source() {
		let storage_error = StorageError::Backend { message: "disk full".into() };
		let gateway_error: Error = storage_error.clone().into();

		assert!(matches!(gateway_error, Error::Storage(_)));
		assert!(gateway_error.to_string().contains("disk full"));

		let source = StdError::source(&gateway_error)
			.expect("Gateway error should expose the original storage error as its source.");

		assert_eq!(source.to_string(), storage_error.to_string());
	}

	#[test]
	fn storage_keys_match_local_storage_names() {
		let names: Vec<_> = StorageKey::ALL.iter().map(|key| key.as_str()).collect();

		assert_eq!(names, ["token", "refreshToken", "user"]);
	}
}
