//! Periodic refresh of a running stopwatch.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::tracker::ElapsedTracker;

/// Tick `tracker` every `period` until it stops running or `shutdown` fires.
///
/// Late ticks are skipped rather than bunched up, since each tick recomputes
/// from the start instant anyway.
pub async fn run_ticker(
    tracker: &mut ElapsedTracker,
    period: Duration,
    shutdown: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            () = shutdown.cancelled() => {
                debug!("Ticker cancelled");
                return;
            }
            _ = interval.tick() => {
                if !tracker.is_running() {
                    debug!("Stopwatch no longer running, ticker exiting");
                    return;
                }
                tracker.tick();
            }
        }
    }
}
