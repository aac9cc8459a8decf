//! Live status surface.
//!
//! The stopwatch pushes snapshots to an external surface (a lock-screen
//! widget, a terminal status line) without waiting for it. Commands travel
//! over an unbounded channel to a single [`ActivityWorker`], which calls the
//! surface and logs whatever goes wrong.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::BigTimerError;
use crate::features::sessions::{join_routines, Routine};

use super::format::format_clock;

/// Snapshot rendered by the live surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityContent {
    /// Whole seconds elapsed.
    #[serde(rename = "seconds")]
    pub elapsed_seconds: u64,
    /// Selected routines, sorted.
    pub routines: Vec<Routine>,
}

/// An external surface that can show the running stopwatch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveActivity: Send + Sync {
    /// Show the surface with initial content.
    async fn request(&self, content: ActivityContent) -> Result<(), BigTimerError>;

    /// Replace the content of a shown surface.
    async fn update(&self, content: ActivityContent) -> Result<(), BigTimerError>;

    /// Dismiss the surface immediately.
    async fn end(&self) -> Result<(), BigTimerError>;
}

/// A request for the live surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityCommand {
    Request(ActivityContent),
    Update(ActivityContent),
    End,
}

/// One-way handle used by the stopwatch to reach the live surface.
///
/// Sending never blocks and never fails the caller.
#[derive(Debug, Clone, Default)]
pub struct ActivitySender {
    tx: Option<mpsc::UnboundedSender<ActivityCommand>>,
}

impl ActivitySender {
    /// Create a sender and the receiving end for an [`ActivityWorker`].
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ActivityCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sender that drops every command.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { tx: None }
    }

    /// Show the surface.
    pub fn request(&self, content: ActivityContent) {
        self.send(ActivityCommand::Request(content));
    }

    /// Push new content.
    pub fn update(&self, content: ActivityContent) {
        self.send(ActivityCommand::Update(content));
    }

    /// Dismiss the surface.
    pub fn end(&self) {
        self.send(ActivityCommand::End);
    }

    fn send(&self, command: ActivityCommand) {
        let Some(tx) = &self.tx else {
            return;
        };

        if let Err(e) = tx.send(command) {
            debug!("Live activity consumer is gone, dropping {:?}", e.0);
        }
    }
}

/// Single consumer that forwards commands to a [`LiveActivity`].
pub struct ActivityWorker {
    activity: Arc<dyn LiveActivity>,
    rx: mpsc::UnboundedReceiver<ActivityCommand>,
    shown: bool,
}

impl ActivityWorker {
    /// Create a worker draining `rx` into `activity`.
    #[must_use]
    pub fn new(
        activity: Arc<dyn LiveActivity>,
        rx: mpsc::UnboundedReceiver<ActivityCommand>,
    ) -> Self {
        Self {
            activity,
            rx,
            shown: false,
        }
    }

    /// Run until every sender has been dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.handle(command).await;
        }
        debug!("Live activity worker finished");
    }

    async fn handle(&mut self, command: ActivityCommand) {
        match command {
            ActivityCommand::Request(content) if self.shown => {
                if let Err(e) = self.activity.update(content).await {
                    warn!("Error updating live activity: {e}");
                }
            },
            ActivityCommand::Request(content) => match self.activity.request(content).await {
                Ok(()) => self.shown = true,
                Err(e) => warn!("Error starting live activity: {e}"),
            },
            // Nothing to update until a request has succeeded
            ActivityCommand::Update(_) if !self.shown => {},
            ActivityCommand::Update(content) => {
                if let Err(e) = self.activity.update(content).await {
                    warn!("Error updating live activity: {e}");
                }
            },
            ActivityCommand::End if !self.shown => {},
            ActivityCommand::End => {
                self.shown = false;
                if let Err(e) = self.activity.end().await {
                    warn!("Error ending live activity: {e}");
                }
            },
        }
    }
}

/// Renders the stopwatch as a single rewritten line on stderr.
#[derive(Debug, Default)]
pub struct TerminalActivity;

impl TerminalActivity {
    fn render(content: &ActivityContent) -> Result<(), BigTimerError> {
        let clock = format_clock(content.elapsed_seconds);
        let routines = if content.routines.is_empty() {
            "no routine".dimmed().to_string()
        } else {
            join_routines(&content.routines).cyan().to_string()
        };

        let mut stderr = std::io::stderr().lock();
        write!(stderr, "\r\x1b[2K{}  {}", clock.bold(), routines)?;
        stderr.flush()?;
        Ok(())
    }

    fn finish() -> Result<(), BigTimerError> {
        writeln!(std::io::stderr().lock())?;
        Ok(())
    }
}

#[async_trait]
impl LiveActivity for TerminalActivity {
    async fn request(&self, content: ActivityContent) -> Result<(), BigTimerError> {
        Self::render(&content)
    }

    async fn update(&self, content: ActivityContent) -> Result<(), BigTimerError> {
        Self::render(&content)
    }

    async fn end(&self) -> Result<(), BigTimerError> {
        Self::finish()
    }
}

/// A surface that accepts everything and shows nothing.
#[derive(Debug, Default)]
pub struct NoopActivity;

#[async_trait]
impl LiveActivity for NoopActivity {
    async fn request(&self, _content: ActivityContent) -> Result<(), BigTimerError> {
        Ok(())
    }

    async fn update(&self, _content: ActivityContent) -> Result<(), BigTimerError> {
        Ok(())
    }

    async fn end(&self) -> Result<(), BigTimerError> {
        Ok(())
    }
}
