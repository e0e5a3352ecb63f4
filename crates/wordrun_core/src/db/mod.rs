//! The journal's SQLite file.
//!
//! One database holds the `kv_store` table that backs the `currentRun` and
//! `history` records. Opening a connection migrates it first, so callers only
//! ever see the latest schema.
//!
//! A file written by a newer build (`user_version` above the last known
//! migration) is refused with `UnsupportedSchemaVersion` rather than opened.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open, migrate or query the journal database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "journal storage error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;

    #[test]
    fn newer_schema_error_names_both_versions() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 3,
            latest_supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "database schema version 3 is newer than supported 1"
        );
    }
}
