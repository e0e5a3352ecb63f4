//! Entry and current-day run model.
//!
//! # Responsibility
//! - Define the word/phonetic pair recorded by the user.
//! - Define the not-yet-archived run of the current day.
//!
//! # Invariants
//! - `Entry` is immutable once created.
//! - `DailyRun.entries` keeps insertion order; duplicates are legal and are
//!   told apart only by position.

use super::date_key::DateKey;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One vocabulary item learned by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    /// Free-form phonetic text, may be empty when the lookup had none.
    #[serde(default)]
    pub phonetic: String,
}

/// Validation failure for user supplied entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyWord,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "entry word must not be empty"),
        }
    }
}

impl Error for EntryValidationError {}

impl Entry {
    pub fn new(word: impl Into<String>, phonetic: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            phonetic: phonetic.into(),
        }
    }

    /// Rejects entries whose word is blank.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.word.trim().is_empty() {
            return Err(EntryValidationError::EmptyWord);
        }
        Ok(())
    }
}

/// Entries recorded for the current, not-yet-archived day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRun {
    pub date: DateKey,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl DailyRun {
    /// Creates an empty run for `date`.
    pub fn new(date: DateKey) -> Self {
        Self {
            date,
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this run belongs to a day other than `today`.
    pub fn is_stale(&self, today: DateKey) -> bool {
        self.date != today
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Removes the entry at `index`, `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }
}
