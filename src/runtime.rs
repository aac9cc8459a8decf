//! Async runtime helpers for commands that need one.

use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::BigTimerError;

/// A runtime driving everything on the calling thread.
///
/// # Errors
///
/// Returns `Io` if the runtime cannot be built.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime, BigTimerError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Cancel `cancellation` on Ctrl-C.
pub async fn detect_shutdown(cancellation: CancellationToken) {
    select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!("Cannot listen for Ctrl-C: {e}");
                return;
            }
            info!("Interrupted");
            cancellation.cancel();
        },
        () = cancellation.cancelled() => {},
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_thread_runtime_runs_futures() {
        let runtime = single_thread_runtime().unwrap();
        assert_eq!(runtime.block_on(async { 21 * 2 }), 42);
    }

    #[tokio::test]
    async fn test_detect_shutdown_returns_once_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        detect_shutdown(token.clone()).await;
        assert!(token.is_cancelled());
    }
}
