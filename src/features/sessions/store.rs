//! Workout session storage.
//!
//! The full session list is loaded once and rewritten to the key-value store
//! after every mutation. Persistence is best-effort: a failed write keeps the
//! change in memory and logs a warning.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use super::routine::{normalize_routines, Routine};
use super::session::WorkoutSession;
use crate::core::KeyValueStore;
use crate::error::BigTimerError;
use crate::storage::SESSIONS_KEY;

/// A change to the session list, delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A session was appended.
    Added(Uuid),
    /// Duration or routines of a session changed.
    Updated(Uuid),
    /// The ate-powder flag was flipped to the given value.
    PowderToggled(Uuid, bool),
    /// A session was removed.
    Deleted(Uuid),
}

type Observer = Box<dyn Fn(&StoreEvent) + Send>;

/// Owner of the workout session list.
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    sessions: Vec<WorkoutSession>,
    observers: Vec<Observer>,
}

impl SessionStore {
    /// Load the session list from `kv`.
    ///
    /// A missing, unreadable or undecodable list yields an empty store.
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let sessions = match kv.get(SESSIONS_KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("Discarding unreadable session list: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read session list: {e}");
                Vec::new()
            },
        };

        debug!(count = sessions.len(), "Loaded workout sessions");

        Self {
            kv,
            sessions,
            observers: Vec::new(),
        }
    }

    /// Register a callback invoked after every effective mutation.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&StoreEvent) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Append a session.
    pub fn add(&mut self, session: WorkoutSession) {
        let id = session.id;
        self.sessions.push(session);
        self.save();
        self.notify(StoreEvent::Added(id));
    }

    /// Replace the duration and routines of the session with `id`.
    ///
    /// Returns `false` without touching storage if no such session exists.
    pub fn update(
        &mut self,
        id: Uuid,
        duration: u64,
        routines: impl IntoIterator<Item = Routine>,
    ) -> bool {
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        session.duration = duration;
        session.routines = normalize_routines(routines);
        self.save();
        self.notify(StoreEvent::Updated(id));
        true
    }

    /// Flip the ate-powder flag of the session with `id`.
    ///
    /// Returns the new value, or `None` if no such session exists.
    pub fn toggle_powder(&mut self, id: Uuid) -> Option<bool> {
        let session = self.sessions.iter_mut().find(|s| s.id == id)?;

        session.ate_powder = !session.ate_powder;
        let ate_powder = session.ate_powder;
        self.save();
        self.notify(StoreEvent::PowderToggled(id, ate_powder));
        Some(ate_powder)
    }

    /// Remove the session with `id`.
    ///
    /// The list is persisted whether or not anything was removed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        let removed = self.sessions.len() != before;

        self.save();
        if removed {
            self.notify(StoreEvent::Deleted(id));
        }
        removed
    }

    /// Sessions on the same local calendar day as `instant`, in insertion order.
    #[must_use]
    pub fn sessions_on(&self, instant: DateTime<Utc>) -> Vec<&WorkoutSession> {
        self.sessions_on_in(instant, &Local)
    }

    /// Sessions on the same calendar day as `instant` in `tz`, in insertion order.
    #[must_use]
    pub fn sessions_on_in<Tz: TimeZone>(
        &self,
        instant: DateTime<Utc>,
        tz: &Tz,
    ) -> Vec<&WorkoutSession> {
        let day = instant.with_timezone(tz).date_naive();
        self.sessions_for_day_in(day, tz)
    }

    /// Sessions whose date falls on `day` in `tz`, in insertion order.
    #[must_use]
    pub fn sessions_for_day_in<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Vec<&WorkoutSession> {
        self.sessions
            .iter()
            .filter(|s| s.day_in(tz) == day)
            .collect()
    }

    /// Distinct local calendar days that have at least one session.
    #[must_use]
    pub fn days_with_sessions(&self) -> BTreeSet<NaiveDate> {
        self.days_with_sessions_in(&Local)
    }

    /// Distinct calendar days in `tz` that have at least one session.
    #[must_use]
    pub fn days_with_sessions_in<Tz: TimeZone>(&self, tz: &Tz) -> BTreeSet<NaiveDate> {
        self.sessions.iter().map(|s| s.day_in(tz)).collect()
    }

    /// Get a session by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&WorkoutSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// All sessions in insertion order.
    #[must_use]
    pub fn all(&self) -> &[WorkoutSession] {
        &self.sessions
    }

    /// Number of sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Resolve a full id or a unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing matches and `InvalidArgument` if the
    /// prefix matches more than one session.
    pub fn resolve(&self, prefix: &str) -> Result<Uuid, BigTimerError> {
        let needle = prefix.trim().to_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(BigTimerError::InvalidArgument("Empty session id".to_string()));
        }

        let mut matches = self
            .sessions
            .iter()
            .filter(|s| s.id.simple().to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(session), None) => Ok(session.id),
            (Some(_), Some(_)) => Err(BigTimerError::InvalidArgument(format!(
                "Session id '{prefix}' is ambiguous"
            ))),
            (None, _) => Err(BigTimerError::NotFound(format!("Session '{prefix}'"))),
        }
    }

    /// Write the full session list to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn persist(&self) -> Result<(), BigTimerError> {
        let bytes = serde_json::to_vec(&self.sessions)?;
        self.kv.set(SESSIONS_KEY, &bytes)
    }

    fn save(&self) {
        if let Err(e) = self.persist() {
            warn!("Session list kept in memory only: {e}");
        }
    }

    fn notify(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }
}
