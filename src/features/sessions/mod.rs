//! Workout sessions and their persistent store.

mod routine;
mod session;
mod store;

pub use routine::{join_routines, normalize_routines, Routine};
pub use session::WorkoutSession;
pub use store::{SessionStore, StoreEvent};
