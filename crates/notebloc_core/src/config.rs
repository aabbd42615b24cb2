//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - Default paths live under the OS temp directory, so resolution never fails.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTEBLOC_DB_PATH";
pub const LOG_DIR_ENV: &str = "NOTEBLOC_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "NOTEBLOC_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "notebloc.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "notebloc-logs";

/// Paths and levels used by hosts to open storage and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// SQLite file holding the `notes` entry.
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl RuntimeConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let temp_dir = std::env::temp_dir();
        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| temp_dir.join(DEFAULT_DB_FILE_NAME)),
            log_dir: non_blank(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| temp_dir.join(DEFAULT_LOG_DIR_NAME)),
            log_level: non_blank(LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}
