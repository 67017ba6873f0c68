//! # Configuration
//!
//! Resolves where the database lives and how verbose logging is.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`FLEET_DB_PATH`, `FLEET_LOG`, then `RUST_LOG`)
//! 3. Defaults (platform data directory, [`DEFAULT_LOG_FILTER`])
//!
//! Configuration is read-only after startup.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Log filter used when neither `FLEET_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,fleet=debug,sqlx=warn";

/// File name of the database inside the data directory.
const DATABASE_FILE: &str = "fleet.db";

/// Configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no home or data directory to default to.
    #[error("Could not determine app data directory; pass --db or set FLEET_DB_PATH")]
    NoDataDirectory,

    /// The database's parent directory could not be created.
    #[error("Could not create data directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// `FLEET_LOG` directive, if set.
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `FLEET_DB_PATH`: database file (overridden by `--db`)
    /// - `FLEET_LOG`: tracing filter directive, e.g. `debug` or `fleet_db=trace`
    pub fn from_env(db_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(db_override, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(db_override: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match db_override {
            Some(path) => path,
            None => match non_empty(lookup("FLEET_DB_PATH")) {
                Some(path) => PathBuf::from(path),
                None => default_database_path()?,
            },
        };

        Ok(AppConfig {
            database_path,
            log_filter: non_empty(lookup("FLEET_LOG")),
        })
    }

    /// Creates the database's parent directory if it doesn't exist.
    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        if self.database_path == Path::new(":memory:") {
            return Ok(());
        }

        match self.database_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDirectory {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Platform-specific default database location.
///
/// - **macOS**: `~/Library/Application Support/com.fleet.rental/fleet.db`
/// - **Windows**: `%APPDATA%\fleet\rental\data\fleet.db`
/// - **Linux**: `~/.local/share/rental/fleet.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "fleet", "rental").ok_or(ConfigError::NoDataDirectory)?;
    Ok(dirs.data_dir().join(DATABASE_FILE))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_flag_beats_environment() {
        let config = AppConfig::from_lookup(
            Some(PathBuf::from("/flag/fleet.db")),
            env(&[("FLEET_DB_PATH", "/env/fleet.db")]),
        )
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/flag/fleet.db"));
    }

    #[test]
    fn test_environment_path_and_log_filter() {
        let config = AppConfig::from_lookup(
            None,
            env(&[("FLEET_DB_PATH", "/env/fleet.db"), ("FLEET_LOG", "debug")]),
        )
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/env/fleet.db"));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(
            Some(PathBuf::from("x.db")),
            env(&[("FLEET_LOG", "  ")]),
        )
        .unwrap();
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn test_ensure_data_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fleet.db");
        let config = AppConfig::from_lookup(Some(path.clone()), env(&[])).unwrap();

        config.ensure_data_dir().unwrap();
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_in_memory_needs_no_directory() {
        let config = AppConfig::from_lookup(Some(PathBuf::from(":memory:")), env(&[])).unwrap();
        assert!(config.ensure_data_dir().is_ok());
    }
}
