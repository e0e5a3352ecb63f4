//! Journal record persistence over a key-value store.
//!
//! # Responsibility
//! - Store the current run under `currentRun` and the history under `history`.
//! - Stamp every stored value with an explicit `format_version`.
//! - Read values written before versioning existed as version 0.
//!
//! # Invariants
//! - Values newer than `CURRENT_FORMAT_VERSION` are rejected, never guessed at.
//! - History is stored oldest first.

use crate::db::DbError;
use crate::model::date_key::DateKey;
use crate::model::entry::{DailyRun, Entry};
use crate::model::history::{History, HistoryDay};
use crate::repo::kv_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const CURRENT_RUN_KEY: &str = "currentRun";
pub const HISTORY_KEY: &str = "history";
pub const CURRENT_FORMAT_VERSION: u32 = 1;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for journal records.
#[derive(Debug)]
pub enum RepoError {
    /// The underlying store failed to read `key`.
    Read { key: &'static str, source: DbError },
    /// The underlying store failed to write or remove `key`.
    Write { key: &'static str, source: DbError },
    /// The value under `key` is not valid JSON for its record type.
    Parse {
        key: &'static str,
        source: serde_json::Error,
    },
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
    UnsupportedFormatVersion {
        key: &'static str,
        found: u32,
        latest_supported: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { key, source } => write!(f, "failed to read `{key}`: {source}"),
            Self::Write { key, source } => write!(f, "failed to write `{key}`: {source}"),
            Self::Parse { key, source } => write!(f, "malformed value under `{key}`: {source}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
            Self::UnsupportedFormatVersion {
                key,
                found,
                latest_supported,
            } => write!(
                f,
                "value under `{key}` has format version {found}, newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Parse { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::UnsupportedFormatVersion { .. } => None,
        }
    }
}

impl RepoError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "storage_read_failed",
            Self::Write { .. } => "storage_write_failed",
            Self::Parse { .. } => "parse_failed",
            Self::Encode { .. } => "encode_failed",
            Self::UnsupportedFormatVersion { .. } => "unsupported_format_version",
        }
    }
}

/// Repository interface for the current run and the archived history.
pub trait DailyLogRepository {
    fn load_current_run(&self) -> RepoResult<Option<DailyRun>>;
    fn save_current_run(&self, run: &DailyRun) -> RepoResult<()>;
    fn clear_current_run(&self) -> RepoResult<()>;
    fn load_history(&self) -> RepoResult<History>;
    fn save_history(&self, history: &History) -> RepoResult<()>;
}

#[derive(Serialize)]
struct StoredRunOut<'a> {
    format_version: u32,
    date: DateKey,
    entries: &'a [Entry],
}

#[derive(Deserialize)]
struct StoredRunIn {
    #[serde(default)]
    format_version: u32,
    date: DateKey,
    #[serde(default)]
    entries: Vec<Entry>,
}

#[derive(Serialize)]
struct StoredHistoryOut<'a> {
    format_version: u32,
    days: &'a [HistoryDay],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredHistoryIn {
    Versioned {
        format_version: u32,
        days: Vec<HistoryDay>,
    },
    // Bare array written before records were versioned.
    Legacy(Vec<HistoryDay>),
}

/// `DailyLogRepository` storing JSON values in any `KeyValueStore`.
pub struct KvDailyLogRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvDailyLogRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read_raw(&self, key: &'static str) -> RepoResult<Option<String>> {
        self.store
            .get_item(key)
            .map_err(|source| RepoError::Read { key, source })
    }

    fn write_raw(&self, key: &'static str, value: &str) -> RepoResult<()> {
        self.store
            .set_item(key, value)
            .map_err(|source| RepoError::Write { key, source })
    }
}

impl<S: KeyValueStore> DailyLogRepository for KvDailyLogRepository<S> {
    fn load_current_run(&self) -> RepoResult<Option<DailyRun>> {
        let Some(raw) = self.read_raw(CURRENT_RUN_KEY)? else {
            return Ok(None);
        };
        let stored: StoredRunIn = serde_json::from_str(&raw).map_err(|source| RepoError::Parse {
            key: CURRENT_RUN_KEY,
            source,
        })?;
        check_format_version(CURRENT_RUN_KEY, stored.format_version)?;
        Ok(Some(DailyRun {
            date: stored.date,
            entries: stored.entries,
        }))
    }

    fn save_current_run(&self, run: &DailyRun) -> RepoResult<()> {
        let value = serde_json::to_string(&StoredRunOut {
            format_version: CURRENT_FORMAT_VERSION,
            date: run.date,
            entries: &run.entries,
        })
        .map_err(|source| RepoError::Encode {
            key: CURRENT_RUN_KEY,
            source,
        })?;
        self.write_raw(CURRENT_RUN_KEY, &value)
    }

    fn clear_current_run(&self) -> RepoResult<()> {
        self.store
            .remove_item(CURRENT_RUN_KEY)
            .map_err(|source| RepoError::Write {
                key: CURRENT_RUN_KEY,
                source,
            })
    }

    fn load_history(&self) -> RepoResult<History> {
        let Some(raw) = self.read_raw(HISTORY_KEY)? else {
            return Ok(History::new());
        };
        let stored: StoredHistoryIn =
            serde_json::from_str(&raw).map_err(|source| RepoError::Parse {
                key: HISTORY_KEY,
                source,
            })?;
        let days = match stored {
            StoredHistoryIn::Versioned {
                format_version,
                days,
            } => {
                check_format_version(HISTORY_KEY, format_version)?;
                days
            }
            StoredHistoryIn::Legacy(days) => days,
        };
        Ok(History::from_days(days))
    }

    fn save_history(&self, history: &History) -> RepoResult<()> {
        let value = serde_json::to_string(&StoredHistoryOut {
            format_version: CURRENT_FORMAT_VERSION,
            days: history.days(),
        })
        .map_err(|source| RepoError::Encode {
            key: HISTORY_KEY,
            source,
        })?;
        self.write_raw(HISTORY_KEY, &value)
    }
}

fn check_format_version(key: &'static str, found: u32) -> RepoResult<()> {
    if found > CURRENT_FORMAT_VERSION {
        return Err(RepoError::UnsupportedFormatVersion {
            key,
            found,
            latest_supported: CURRENT_FORMAT_VERSION,
        });
    }
    Ok(())
}
