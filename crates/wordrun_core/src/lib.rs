//! Core domain logic for WordRun, a daily vocabulary journal.
//! This crate is the single source of truth for the journal's invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::date_key::{DateKey, DateKeyParseError};
pub use model::entry::{DailyRun, Entry, EntryValidationError};
pub use model::history::{History, HistoryDay, UpsertOutcome};
pub use repo::daily_log_repo::{
    DailyLogRepository, KvDailyLogRepository, RepoError, RepoResult, CURRENT_FORMAT_VERSION,
    CURRENT_RUN_KEY, HISTORY_KEY,
};
pub use repo::kv_store::{KeyValueStore, SqliteKeyValueStore};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::daily_log_service::{
    DailyLogError, DailyLogResult, DailyLogService, HistoryDaySummary, RolloverOutcome,
};
pub use service::session::{AppSession, RunView, Tab};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
