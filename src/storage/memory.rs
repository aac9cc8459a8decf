//! In-process key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::KeyValueStore;
use crate::error::BigTimerError;

/// A [`KeyValueStore`] kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, BigTimerError> {
        self.values
            .lock()
            .map_err(|_| BigTimerError::Database("Memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BigTimerError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), BigTimerError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BigTimerError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
