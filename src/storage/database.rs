//! `SQLite` key-value store.
//!
//! The database is stored at `~/.bigtimer/bigtimer.db` and holds one `kv`
//! table. Each logical value (the session list, the timer start instant, the
//! pending routine selection) is one row, rewritten whole on every change.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::KeyValueStore;
use crate::error::BigTimerError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, BigTimerError> {
        let conn = Connection::open(path).map_err(|e| {
            BigTimerError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        Self::with_connection(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, BigTimerError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            BigTimerError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, BigTimerError> {
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, BigTimerError> {
        migrations::get_version(&*self.connection()?)
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, BigTimerError> {
        self.conn
            .lock()
            .map_err(|_| BigTimerError::Database("Connection lock poisoned".to_string()))
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BigTimerError> {
        let conn = self.connection()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| BigTimerError::Database(format!("Failed to read {key}: {e}")))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), BigTimerError> {
        let conn = self.connection()?;
        conn.execute(
            r"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
              ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| BigTimerError::Database(format!("Failed to write {key}: {e}")))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BigTimerError> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| BigTimerError::Database(format!("Failed to remove {key}: {e}")))?;

        Ok(())
    }
}
