//! Command implementations for bigtimer.
//!
//! Each command returns the text to print, already rendered for the chosen
//! output format.

mod completions;
mod history;
mod timer;

pub use completions::generate_completions;
pub use history::{add, calendar, delete, edit, history, powder};
pub use timer::{reset, routine, start, status, stop, submit, watch};

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::debug;

use crate::config::{Config, Paths};
use crate::core::{Clock, KeyValueStore, SystemClock};
use crate::error::BigTimerError;
use crate::features::sessions::{Routine, SessionStore};
use crate::features::timer::{ActivitySender, ElapsedTracker};
use crate::storage::Database;

/// Everything a command needs: settings, storage and the clock.
pub struct Context {
    pub config: Config,
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl Context {
    #[must_use]
    pub fn new(config: Config, kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { config, kv, clock }
    }

    /// Open the on-disk database under `paths` with the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(paths: &Paths, config: Config) -> Result<Self, BigTimerError> {
        let database = Database::open_at(&paths.database)?;
        debug!(
            path = %paths.database.display(),
            schema = database.schema_version()?,
            "Opened database"
        );
        Ok(Self::new(config, Arc::new(database), Arc::new(SystemClock)))
    }

    /// Restore the stopwatch, reporting to `activity`.
    #[must_use]
    pub fn tracker(&self, activity: ActivitySender) -> ElapsedTracker {
        ElapsedTracker::restore(self.kv.clone(), self.clock.clone(), activity)
    }

    /// Load the session store.
    #[must_use]
    pub fn sessions(&self) -> SessionStore {
        SessionStore::load(self.kv.clone())
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Today in the local timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

fn parse_routines(names: &[String]) -> Result<Vec<Routine>, BigTimerError> {
    names.iter().map(|name| Routine::parse(name)).collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::ManualClock;
    use crate::storage::MemoryStore;

    /// A context over an in-memory store and a manual clock.
    pub fn create_test_context() -> (Context, ManualClock) {
        let clock = ManualClock::new(Utc::now());
        let context = Context::new(
            Config::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(clock.clone()),
        );
        (context, clock)
    }
}
