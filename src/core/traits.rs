//! Shared traits for persisted state and time.
//!
//! The session store and the stopwatch both sit on top of these so tests can
//! swap in an in-memory blob store and a hand-driven clock.

use chrono::{DateTime, Utc};

use crate::error::BigTimerError;

/// An opaque key-value blob store.
///
/// Every value is rewritten whole; there are no partial updates and no
/// transactions. A single in-process owner is assumed.
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BigTimerError>;

    /// Store `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), BigTimerError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), BigTimerError>;
}

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}
