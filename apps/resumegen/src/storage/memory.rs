//! In-process slot storage for tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{KeyValueStorage, StorageError};

/// In-process storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot, e.g. with a corrupt value in tests.
    pub fn with_slot(self, key: &str, value: &str) -> Self {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DARK_MODE_KEY, RESUME_DATA_KEY};

    #[test]
    fn test_memory_storage_missing_slot_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get(RESUME_DATA_KEY).unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let storage = MemoryStorage::new().with_slot(DARK_MODE_KEY, "false");
        storage.set(DARK_MODE_KEY, "true").unwrap();
        assert_eq!(storage.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    }
}
