//! Thread-safe in-memory [`SessionStorage`] implementation for tests and ephemeral processes.

// self
use crate::{
	_prelude::*,
	storage::{SessionStorage, StorageError, StorageKey},
};

/// Storage backend that keeps the session mirror in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage(Arc<RwLock<BTreeMap<StorageKey, String>>>);
impl MemoryStorage {
	/// Returns the number of stored keys.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl SessionStorage for MemoryStorage {
	fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
		Ok(self.0.read().get(&key).cloned())
	}

	fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
		self.0.write().insert(key, value.to_owned());

		Ok(())
	}

	fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
		self.0.write().remove(&key);

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn set_get_and_remove() {
		let storage = MemoryStorage::default();

		storage.set(StorageKey::AccessToken, "A1").expect("Memory storage set should succeed.");

		assert_eq!(
			storage.get(StorageKey::AccessToken).expect("Memory storage get should succeed."),
			Some("A1".into())
		);
		assert_eq!(storage.len(), 1);

		storage.remove(StorageKey::AccessToken).expect("Memory storage remove should succeed.");
		storage.remove(StorageKey::User).expect("Removing an absent key should succeed.");

		assert!(storage.is_empty());
	}

	#[test]
	fn clones_share_state() {
		let storage = MemoryStorage::default();
		let clone = storage.clone();

		clone.set(StorageKey::RefreshToken, "R1").expect("Memory storage set should succeed.");

		assert_eq!(
			storage.get(StorageKey::RefreshToken).expect("Memory storage get should succeed."),
			Some("R1".into())
		);
	}
}
