//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank environment values count as unset.
//! - Resolution never fails; missing values fall back to defaults.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "WORDRUN_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "WORDRUN_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "WORDRUN_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "wordrun.sqlite3";

/// Where the journal lives and how it logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `WORDRUN_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, one variable name at a time.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: non_blank(LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
