//! Configuration management for bigtimer.
//!
//! This module handles loading configuration from `~/.bigtimer/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{Config, GeneralConfig, LoggingConfig, TimerConfig};
