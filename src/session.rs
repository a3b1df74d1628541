//! In-memory session store with write-through mirroring to [`SessionStorage`].
//!
//! The [`SessionState`] is the only owner of authentication state. It is created once per
//! gateway, optionally rehydrated from storage, mutated on login and token refresh, and torn
//! down on logout or unrecoverable authorization failures. Every mutation is mirrored to the
//! storage backend on a best-effort basis: storage failures are logged and never roll back the
//! in-memory change.

// self
use crate::{
	_prelude::*,
	auth::{CurrentUser, TokenSecret},
	storage::{SessionStorage, StorageKey},
};

/// Point-in-time view of the authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
	/// Bearer token attached to outbound requests.
	pub access_token: Option<TokenSecret>,
	/// Credential exchanged for a new access token after a 401.
	pub refresh_token: Option<TokenSecret>,
	/// Signed-in account profile.
	pub current_user: Option<CurrentUser>,
	/// `true` once credentials were stored by login or restored from storage.
	pub is_authenticated: bool,
}

/// Shared, lock-protected session store.
pub struct SessionState {
	inner: RwLock<Session>,
	storage: Arc<dyn SessionStorage>,
}
impl SessionState {
	/// Creates an empty, unauthenticated session backed by `storage` without reading it.
	pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
		Self { inner: RwLock::new(Session::default()), storage }
	}

	/// Creates a session rehydrated from `storage`.
	///
	/// The session is only considered authenticated when both tokens are present. Read failures
	/// and a malformed stored user are logged and skipped.
	pub fn restore(storage: Arc<dyn SessionStorage>) -> Self {
		let state = Self::new(storage);
		let access = state.read_key(StorageKey::AccessToken);
		let refresh = state.read_key(StorageKey::RefreshToken);

		if let (Some(access), Some(refresh)) = (access, refresh) {
			let current_user = state.read_key(StorageKey::User).and_then(|raw| {
				serde_json::from_str::<CurrentUser>(&raw)
					.inspect_err(|e| {
						tracing::warn!(error = %e, "Failed to parse stored user; ignoring it.");
					})
					.ok()
			});

			*state.inner.write() = Session {
				access_token: Some(TokenSecret::new(access)),
				refresh_token: Some(TokenSecret::new(refresh)),
				current_user,
				is_authenticated: true,
			};

			tracing::debug!("Restored session from storage.");
		}

		state
	}

	/// Returns a copy of the current session.
	pub fn snapshot(&self) -> Session {
		self.inner.read().clone()
	}

	/// Returns the current access token, if any.
	pub fn access_token(&self) -> Option<TokenSecret> {
		self.inner.read().access_token.clone()
	}

	/// Returns the current refresh token, if any.
	pub fn refresh_token(&self) -> Option<TokenSecret> {
		self.inner.read().refresh_token.clone()
	}

	/// Returns the signed-in user, if known.
	pub fn current_user(&self) -> Option<CurrentUser> {
		self.inner.read().current_user.clone()
	}

	/// Returns `true` while credentials are held.
	pub fn is_authenticated(&self) -> bool {
		self.inner.read().is_authenticated
	}

	/// Stores a freshly issued credential pair, replacing the user only when one is provided.
	pub fn set_credentials(
		&self,
		access_token: TokenSecret,
		refresh_token: TokenSecret,
		user: Option<CurrentUser>,
	) {
		let mut guard = self.inner.write();

		self.write_key(StorageKey::AccessToken, access_token.expose());
		self.write_key(StorageKey::RefreshToken, refresh_token.expose());

		if let Some(user) = &user {
			match serde_json::to_string(user) {
				Ok(raw) => self.write_key(StorageKey::User, &raw),
				Err(e) => tracing::warn!(error = %e, "Failed to serialize current user."),
			}
		}

		guard.access_token = Some(access_token);
		guard.refresh_token = Some(refresh_token);
		guard.current_user = user.or(guard.current_user.take());
		guard.is_authenticated = true;
	}

	/// Stores a refreshed access token, rotating the refresh token only when one is provided.
	///
	/// `exchanged` is the refresh token the exchange was made with. Returns `false` without
	/// touching anything when the session no longer holds it, which happens when the session was
	/// cleared or replaced by a new login while the exchange was in flight.
	pub fn update_access_token(
		&self,
		exchanged: &TokenSecret,
		access_token: TokenSecret,
		rotated: Option<TokenSecret>,
	) -> bool {
		let mut guard = self.inner.write();

		if guard.refresh_token.as_ref() != Some(exchanged) {
			return false;
		}

		let refresh_token = rotated.unwrap_or_else(|| exchanged.clone());

		self.write_key(StorageKey::AccessToken, access_token.expose());
		self.write_key(StorageKey::RefreshToken, refresh_token.expose());

		guard.access_token = Some(access_token);
		guard.refresh_token = Some(refresh_token);
		guard.is_authenticated = true;

		true
	}

	/// Clears all credentials and removes every persisted key.
	///
	/// Idempotent; returns `true` only when the call actually dropped held state.
	pub fn clear(&self) -> bool {
		let mut guard = self.inner.write();

		self.clear_locked(&mut guard)
	}

	/// Clears the session only while it still holds `refresh_token` (`None` meaning no refresh
	/// token at all).
	///
	/// Returns `true` only when held state was dropped. A session replaced by a newer login is
	/// left untouched.
	pub fn clear_if_current(&self, refresh_token: Option<&TokenSecret>) -> bool {
		let mut guard = self.inner.write();

		if guard.refresh_token.as_ref() != refresh_token {
			return false;
		}

		self.clear_locked(&mut guard)
	}

	fn clear_locked(&self, session: &mut Session) -> bool {
		let was_populated = *session != Session::default();

		for key in StorageKey::ALL {
			if let Err(e) = self.storage.remove(key) {
				tracing::warn!(%key, error = %e, "Failed to remove persisted session key.");
			}
		}

		*session = Session::default();

		was_populated
	}

	fn read_key(&self, key: StorageKey) -> Option<String> {
		self.storage
			.get(key)
			.inspect_err(|e| {
				tracing::warn!(%key, error = %e, "Failed to read persisted session key.");
			})
			.ok()
			.flatten()
	}

	fn write_key(&self, key: StorageKey, value: &str) {
		if let Err(e) = self.storage.set(key, value) {
			tracing::warn!(%key, error = %e, "Failed to persist session key.");
		}
	}
}
impl Debug for SessionState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let session = self.inner.read();

		f.debug_struct("SessionState")
			.field("is_authenticated", &session.is_authenticated)
			.field("has_access_token", &session.access_token.is_some())
			.field("has_refresh_token", &session.refresh_token.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::storage::{MemoryStorage, StorageError};

	fn memory_state() -> (SessionState, Arc<MemoryStorage>) {
		let storage = Arc::new(MemoryStorage::default());

		(SessionState::new(storage.clone()), storage)
	}

	fn stored(storage: &MemoryStorage, key: StorageKey) -> Option<String> {
		storage.get(key).expect("Memory storage reads should succeed.")
	}

	fn user(name: &str) -> CurrentUser {
		CurrentUser {
			id: Some("u-1".into()),
			name: Some(name.into()),
			role: Some("admin".into()),
			..Default::default()
		}
	}

	#[test]
	fn set_credentials_writes_through() {
		let (state, storage) = memory_state();

		state.set_credentials("A1".into(), "R1".into(), Some(user("Abebe")));

		let session = state.snapshot();

		assert!(session.is_authenticated);
		assert_eq!(session.access_token.as_ref().map(TokenSecret::expose), Some("A1"));
		assert_eq!(stored(&storage, StorageKey::AccessToken).as_deref(), Some("A1"));
		assert_eq!(stored(&storage, StorageKey::RefreshToken).as_deref(), Some("R1"));

		let stored_user = stored(&storage, StorageKey::User).expect("User should be stored.");
		let parsed: CurrentUser =
			serde_json::from_str(&stored_user).expect("Stored user should be JSON.");

		assert_eq!(parsed, user("Abebe"));
	}

	#[test]
	fn set_credentials_without_user_keeps_existing_user() {
		let (state, _) = memory_state();

		state.set_credentials("A1".into(), "R1".into(), Some(user("Abebe")));
		state.set_credentials("A2".into(), "R2".into(), None);

		assert_eq!(state.current_user(), Some(user("Abebe")));
	}

	#[test]
	fn update_access_token_keeps_refresh_token_when_not_rotated() {
		let (state, storage) = memory_state();

		state.set_credentials("A1".into(), "R1".into(), None);

		assert!(state.update_access_token(&"R1".into(), "A2".into(), None));
		assert_eq!(state.access_token().as_ref().map(TokenSecret::expose), Some("A2"));
		assert_eq!(state.refresh_token().as_ref().map(TokenSecret::expose), Some("R1"));
		assert_eq!(stored(&storage, StorageKey::AccessToken).as_deref(), Some("A2"));

		assert!(state.update_access_token(&"R1".into(), "A3".into(), Some("R3".into())));
		assert_eq!(stored(&storage, StorageKey::RefreshToken).as_deref(), Some("R3"));
	}

	#[test]
	fn update_access_token_is_ignored_after_clear() {
		let (state, storage) = memory_state();

		state.set_credentials("A1".into(), "R1".into(), None);
		state.clear();

		assert!(!state.update_access_token(&"R1".into(), "A2".into(), None));
		assert!(!state.update_access_token(&"R1".into(), "A2".into(), Some("R2".into())));
		assert!(!state.is_authenticated());
		assert_eq!(state.access_token(), None);
		assert!(storage.is_empty());
	}

	#[test]
	fn update_access_token_keeps_newer_login() {
		let (state, storage) = memory_state();

		state.set_credentials("A9".into(), "R9".into(), None);

		assert!(!state.update_access_token(&"R1".into(), "A2".into(), Some("R2".into())));
		assert_eq!(state.access_token().as_ref().map(TokenSecret::expose), Some("A9"));
		assert_eq!(stored(&storage, StorageKey::RefreshToken).as_deref(), Some("R9"));
	}

	#[test]
	fn clear_if_current_spares_replaced_session() {
		let (state, storage) = memory_state();

		state.set_credentials("A9".into(), "R9".into(), None);

		assert!(!state.clear_if_current(Some(&"R1".into())));
		assert!(state.is_authenticated());
		assert_eq!(stored(&storage, StorageKey::AccessToken).as_deref(), Some("A9"));

		assert!(state.clear_if_current(Some(&"R9".into())));
		assert!(!state.is_authenticated());
		assert!(storage.is_empty());
	}

	#[test]
	fn clear_is_idempotent() {
		let (state, storage) = memory_state();

		state.set_credentials("A1".into(), "R1".into(), Some(user("Abebe")));

		assert!(state.clear());
		assert!(!state.clear());
		assert_eq!(state.snapshot(), Session::default());
		assert!(storage.is_empty());
	}

	#[test]
	fn restore_requires_both_tokens() {
		let storage = Arc::new(MemoryStorage::default());

		storage.set(StorageKey::AccessToken, "A1").expect("Set should succeed.");

		let state = SessionState::restore(storage.clone());

		assert!(!state.is_authenticated());
		assert_eq!(state.access_token(), None);

		storage.set(StorageKey::RefreshToken, "R1").expect("Set should succeed.");

		let state = SessionState::restore(storage);

		assert!(state.is_authenticated());
		assert_eq!(state.refresh_token().as_ref().map(TokenSecret::expose), Some("R1"));
	}

	#[test]
	fn restore_skips_malformed_user() {
		let storage = Arc::new(MemoryStorage::default());

		storage.set(StorageKey::AccessToken, "A1").expect("Set should succeed.");
		storage.set(StorageKey::RefreshToken, "R1").expect("Set should succeed.");
		storage.set(StorageKey::User, "{not json").expect("Set should succeed.");

		let state = SessionState::restore(storage);

		assert!(state.is_authenticated());
		assert_eq!(state.current_user(), None);
	}

	#[test]
	fn storage_failures_do_not_block_mutations() {
		struct BrokenStorage;
		impl SessionStorage for BrokenStorage {
			fn get(&self, _: StorageKey) -> Result<Option<String>, StorageError> {
				Err(StorageError::Backend { message: "unavailable".into() })
			}

			fn set(&self, _: StorageKey, _: &str) -> Result<(), StorageError> {
				Err(StorageError::Backend { message: "unavailable".into() })
			}

			fn remove(&self, _: StorageKey) -> Result<(), StorageError> {
				Err(StorageError::Backend { message: "unavailable".into() })
			}
		}

		let state = SessionState::restore(Arc::new(BrokenStorage));

		assert!(!state.is_authenticated());

		state.set_credentials("A1".into(), "R1".into(), None);

		assert!(state.is_authenticated());
		assert!(state.clear());
	}

	#[test]
	fn debug_output_redacts_tokens() {
		let (state, _) = memory_state();

		state.set_credentials("super-secret".into(), "R1".into(), None);

		let rendered = format!("{state:?}");

		assert!(!rendered.contains("super-secret"));
		assert!(rendered.contains("is_authenticated: true"));
	}
}
