//! Archived days.
//!
//! # Invariants
//! - `HistoryDay.id` equals the archived run's `date` and is unique within a
//!   `History`.
//! - Storage order is archival order, oldest first. Display order is derived.

use super::date_key::DateKey;
use super::entry::{DailyRun, Entry};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a past day's run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDay {
    pub id: DateKey,
    pub date: DateKey,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl HistoryDay {
    /// Snapshots `run`, keyed by its calendar day.
    pub fn from_run(run: DailyRun) -> Self {
        Self {
            id: run.date,
            date: run.date,
            entries: run.entries,
        }
    }
}

/// Result of inserting a day into a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced { position: usize },
}

/// Archived days in archival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    days: Vec<HistoryDay>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history, keeping the last occurrence of a repeated id at the
    /// position of its first occurrence.
    pub fn from_days(days: Vec<HistoryDay>) -> Self {
        let mut history = Self::new();
        for day in days {
            history.upsert(day);
        }
        history
    }

    /// Replaces the day with the same id in place, or appends it.
    pub fn upsert(&mut self, day: HistoryDay) -> UpsertOutcome {
        match self.days.iter().position(|existing| existing.id == day.id) {
            Some(position) => {
                self.days[position] = day;
                UpsertOutcome::Replaced { position }
            }
            None => {
                self.days.push(day);
                UpsertOutcome::Inserted
            }
        }
    }

    pub fn get(&self, id: DateKey) -> Option<&HistoryDay> {
        self.days.iter().find(|day| day.id == id)
    }

    /// Days oldest first, as stored.
    pub fn days(&self) -> &[HistoryDay] {
        &self.days
    }

    /// Days newest first; the stored order is left untouched.
    pub fn newest_first(&self) -> Vec<HistoryDay> {
        self.days.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{History, HistoryDay, UpsertOutcome};
    use crate::model::date_key::DateKey;
    use crate::model::entry::{DailyRun, Entry};

    fn archived(d: u32, words: &[&str]) -> HistoryDay {
        let mut run = DailyRun::new(DateKey::from_ymd(2024, 3, d).unwrap());
        for word in words {
            run.push(Entry::new(*word, ""));
        }
        HistoryDay::from_run(run)
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut history = History::new();
        assert_eq!(history.upsert(archived(1, &["a"])), UpsertOutcome::Inserted);
        assert_eq!(history.upsert(archived(2, &["b"])), UpsertOutcome::Inserted);

        let outcome = history.upsert(archived(1, &["c", "d"]));
        assert_eq!(outcome, UpsertOutcome::Replaced { position: 0 });
        assert_eq!(history.len(), 2);
        assert_eq!(history.days()[0].entries.len(), 2);
        assert_eq!(history.days()[1].id.to_string(), "2024-03-02");
    }

    #[test]
    fn newest_first_does_not_touch_storage_order() {
        let history = History::from_days(vec![archived(1, &["a"]), archived(2, &["b"])]);
        let display = history.newest_first();
        assert_eq!(display[0].id.to_string(), "2024-03-02");
        assert_eq!(history.days()[0].id.to_string(), "2024-03-01");
    }

    #[test]
    fn from_days_collapses_duplicate_ids() {
        let history = History::from_days(vec![
            archived(1, &["a"]),
            archived(2, &["b"]),
            archived(1, &["z"]),
        ]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.days()[0].entries[0].word, "z");
    }
}
