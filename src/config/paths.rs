//! Path resolution for bigtimer configuration and data files.
//!
//! All bigtimer data is stored in `~/.bigtimer/`:
//! - `config.yaml` - Main configuration file
//! - `bigtimer.db` - SQLite key-value store for sessions and timer state
//! - `logs/` - Daily-rotated log files

use std::path::{Path, PathBuf};

use crate::error::BigTimerError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "BIGTIMER_HOME";

/// Paths to bigtimer configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.bigtimer/`
    pub root: PathBuf,
    /// Config file: `~/.bigtimer/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.bigtimer/bigtimer.db`
    pub database: PathBuf,
    /// Logs directory: `~/.bigtimer/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// `BIGTIMER_HOME` takes precedence when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BigTimerError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            BigTimerError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".bigtimer")))
    }

    /// Resolve paths from an explicit root, falling back to [`Paths::new`].
    ///
    /// # Errors
    ///
    /// Returns an error if no root was given and the home directory cannot be determined.
    pub fn resolve(root: Option<&Path>) -> Result<Self, BigTimerError> {
        root.map_or_else(Self::new, |r| Ok(Self::with_root(r.to_path_buf())))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("bigtimer.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), BigTimerError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    BigTimerError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-bigtimer");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("bigtimer.db"));
        assert_eq!(paths.logs, root.join("logs"));
    }

    #[test]
    fn test_resolve_explicit_root() {
        let root = PathBuf::from("/tmp/explicit");
        let paths = Paths::resolve(Some(&root)).unwrap();
        assert_eq!(paths.root, root);
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.logs.exists());
    }
}
