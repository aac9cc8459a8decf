//! Elapsed-time tracking for the workout stopwatch.
//!
//! Elapsed time is always recomputed from an absolute start instant rather
//! than counted up tick by tick. The start instant is persisted while the
//! stopwatch runs, so a process that is suspended, killed or simply exits
//! picks up the correct value the next time it is restored.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::activity::{ActivityContent, ActivitySender};
use crate::core::{Clock, KeyValueStore};
use crate::error::BigTimerError;
use crate::features::sessions::{Routine, SessionStore, WorkoutSession};
use crate::storage::{PAUSED_ELAPSED_KEY, SELECTED_ROUTINES_KEY, START_TIME_KEY};

/// Observable stopwatch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Nothing in progress, elapsed is zero
    Idle,
    /// Counting from a start instant
    Running,
    /// Stopped with time on the clock
    Paused,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// The workout stopwatch.
pub struct ElapsedTracker {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    activity: ActivitySender,
    start_instant: Option<DateTime<Utc>>,
    running: bool,
    elapsed: u64,
    selected: BTreeSet<Routine>,
    last_pushed: Option<u64>,
}

impl ElapsedTracker {
    /// Create an idle stopwatch without reading any persisted state.
    #[must_use]
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        activity: ActivitySender,
    ) -> Self {
        Self {
            kv,
            clock,
            activity,
            start_instant: None,
            running: false,
            elapsed: 0,
            selected: BTreeSet::new(),
            last_pushed: None,
        }
    }

    /// Rebuild the stopwatch from persisted state.
    ///
    /// A persisted start instant resumes straight into Running and requests
    /// the live surface. Nothing is written back.
    #[must_use]
    pub fn restore(
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        activity: ActivitySender,
    ) -> Self {
        let mut tracker = Self::new(kv, clock, activity);

        if let Some(routines) = tracker.load::<Vec<Routine>>(SELECTED_ROUTINES_KEY) {
            tracker.selected = routines.into_iter().collect();
        }
        if let Some(elapsed) = tracker.load::<u64>(PAUSED_ELAPSED_KEY) {
            tracker.elapsed = elapsed;
        }
        if let Some(start) = tracker.load::<DateTime<Utc>>(START_TIME_KEY) {
            debug!(%start, "Resuming stopwatch from persisted start");
            tracker.start_instant = Some(start);
            tracker.running = true;
            tracker.elapsed = tracker.elapsed_at(tracker.clock.now());
            tracker.last_pushed = Some(tracker.elapsed);
            tracker.activity.request(tracker.snapshot());
        }

        tracker
    }

    /// Start, or continue after a pause.
    pub fn start(&mut self) {
        if self.running {
            return;
        }

        let now = self.clock.now();
        if self.start_instant.is_none() {
            let seconds = i64::try_from(self.elapsed).unwrap_or(i64::MAX);
            let offset = Duration::seconds(seconds.min(i64::MAX / 1000));
            let start = now - offset;
            self.start_instant = Some(start);
            self.save(START_TIME_KEY, &start);
        }

        self.running = true;
        self.forget(PAUSED_ELAPSED_KEY);
        self.elapsed = self.elapsed_at(now);
        self.last_pushed = Some(self.elapsed);
        self.activity.request(self.snapshot());

        info!(elapsed = self.elapsed, "Stopwatch running");
    }

    /// Pause, keeping the elapsed value.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        self.elapsed = self.elapsed_at(self.clock.now());
        self.running = false;
        self.start_instant = None;
        self.forget(START_TIME_KEY);
        self.save(PAUSED_ELAPSED_KEY, &self.elapsed);
        self.activity.end();

        info!(elapsed = self.elapsed, "Stopwatch paused");
    }

    /// Clear the clock and the routine selection.
    pub fn reset(&mut self) {
        self.stop();
        self.elapsed = 0;
        self.last_pushed = None;
        self.selected.clear();
        self.forget(START_TIME_KEY);
        self.forget(PAUSED_ELAPSED_KEY);
        self.forget(SELECTED_ROUTINES_KEY);

        debug!("Stopwatch reset");
    }

    /// Record the current run as a workout and reset.
    ///
    /// A running stopwatch is stopped first. Returns `None` when there is no
    /// time on the clock.
    pub fn submit(&mut self, store: &mut SessionStore) -> Option<WorkoutSession> {
        self.stop();

        if self.elapsed == 0 {
            return None;
        }

        let session = WorkoutSession::at(
            self.clock.now(),
            self.elapsed,
            self.selected.iter().copied(),
            false,
        );
        store.add(session.clone());
        self.reset();

        info!(id = %session.id, duration = session.duration, "Workout submitted");
        Some(session)
    }

    /// Recompute elapsed time, pushing a snapshot when the whole-second value changed.
    pub fn tick(&mut self) -> u64 {
        if !self.running {
            return self.elapsed;
        }

        self.elapsed = self.elapsed_at(self.clock.now());
        if self.last_pushed != Some(self.elapsed) {
            self.last_pushed = Some(self.elapsed);
            self.activity.update(self.snapshot());
        }

        self.elapsed
    }

    /// Add or remove a routine from the selection.
    ///
    /// Returns whether the routine is selected afterwards.
    pub fn toggle_routine(&mut self, routine: Routine) -> bool {
        let selected = if self.selected.remove(&routine) {
            false
        } else {
            self.selected.insert(routine);
            true
        };

        self.selection_changed();
        selected
    }

    /// Replace the whole selection.
    pub fn set_routines(&mut self, routines: impl IntoIterator<Item = Routine>) {
        self.selected = routines.into_iter().collect();
        self.selection_changed();
    }

    /// Current snapshot for the live surface.
    #[must_use]
    pub fn snapshot(&self) -> ActivityContent {
        ActivityContent {
            elapsed_seconds: self.elapsed,
            routines: self.selected_routines(),
        }
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.elapsed > 0 {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    /// Check if the stopwatch is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed whole seconds as of the last tick or transition.
    #[must_use]
    pub const fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// The instant the current run counts from, while running.
    #[must_use]
    pub const fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.start_instant
    }

    /// Selected routines, sorted.
    #[must_use]
    pub fn selected_routines(&self) -> Vec<Routine> {
        self.selected.iter().copied().collect()
    }

    fn elapsed_at(&self, now: DateTime<Utc>) -> u64 {
        self.start_instant.map_or(self.elapsed, |start| {
            u64::try_from((now - start).num_seconds()).unwrap_or(0)
        })
    }

    fn selection_changed(&self) {
        self.save(SELECTED_ROUTINES_KEY, &self.selected_routines());
        if self.running {
            self.activity.update(self.snapshot());
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.kv.get(key) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes)
                .inspect_err(|e| warn!("Ignoring unreadable {key}: {e}"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read {key}: {e}");
                None
            },
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_vec(value)
            .map_err(BigTimerError::from)
            .and_then(|bytes| self.kv.set(key, &bytes));

        if let Err(e) = result {
            warn!("Could not persist {key}: {e}");
        }
    }

    fn forget(&self, key: &str) {
        if let Err(e) = self.kv.remove(key) {
            warn!("Could not clear {key}: {e}");
        }
    }
}
