//! Daily log use-case service.
//!
//! # Responsibility
//! - Serve read/append/delete of the current day's run to UI callers.
//! - Roll a stale run into the history when the calendar day changes.
//!
//! # Invariants
//! - A run with entries is written to history before the current-run record
//!   is cleared; a failed history write leaves the stale run in storage.
//! - An empty run is never archived.
//! - Rollover is idempotent once caught up with today.
//! - Storage failures are logged and degrade to "no data"; they never reach
//!   callers.
//! - A current-run value that could not be read, or that is newer than this
//!   build understands, is never overwritten.
//! - A stale run is only ever edited by the archive.
//!
//! Log events carry dates and counts only, never the words themselves.

use crate::model::date_key::DateKey;
use crate::model::entry::{DailyRun, Entry, EntryValidationError};
use crate::model::history::{HistoryDay, UpsertOutcome};
use crate::repo::daily_log_repo::{DailyLogRepository, RepoError};
use crate::service::clock::Clock;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DailyLogResult<T> = Result<T, DailyLogError>;

/// Caller-facing errors of the daily log. Storage errors never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyLogError {
    IndexOutOfRange { index: usize, len: usize },
    Validation(EntryValidationError),
}

impl Display for DailyLogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "entry index {index} out of range for run of {len} entries")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DailyLogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IndexOutOfRange { .. } => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for DailyLogError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// What the day check did with the persisted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverOutcome {
    /// Nothing persisted, or the persisted run is today's.
    UpToDate,
    /// A stale run without entries was dropped; history untouched.
    DiscardedEmpty { stale_date: DateKey },
    /// A stale run was written to history and the current run reset.
    Archived {
        date: DateKey,
        entry_count: usize,
        upsert: UpsertOutcome,
    },
    /// The archive could not be written; the stale run stays in storage and
    /// the next call retries.
    Deferred { stale_date: DateKey },
    /// The current-run record exists but could not be read; it is kept as is.
    Unreadable,
}

/// One line of the history list, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDaySummary {
    pub id: DateKey,
    /// `Day N`, where `N` is the 1-based archival position.
    pub label: String,
    pub date: DateKey,
    pub entry_count: usize,
}

/// Owner of the current run and the archive rule.
pub struct DailyLogService<R: DailyLogRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: DailyLogRepository, C: Clock> DailyLogService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Returns today's run, archiving a stale one first.
    ///
    /// Safe to call on every screen focus.
    pub fn current_run(&self) -> DailyRun {
        let (run, _) = self.check_day(self.clock.today());
        run
    }

    /// Runs only the day check and reports what it did.
    pub fn roll_over(&self) -> RolloverOutcome {
        let (_, outcome) = self.check_day(self.clock.today());
        outcome
    }

    /// Appends an entry to today's run, rolling over first when the day
    /// changed since the run was last written.
    ///
    /// # Errors
    /// - `Validation` when `word` is blank.
    pub fn append_entry(
        &self,
        word: impl Into<String>,
        phonetic: impl Into<String>,
    ) -> DailyLogResult<DailyRun> {
        let entry = Entry::new(word, phonetic);
        entry.validate()?;

        let (mut run, outcome) = self.check_day(self.clock.today());
        run.push(entry);

        match outcome {
            RolloverOutcome::Deferred { stale_date } => {
                // Persisting now would overwrite the unarchived run.
                warn!(
                    "event=entry_append module=service status=degraded reason=archive_pending stale_date={} entries={}",
                    stale_date,
                    run.len()
                );
                return Ok(run);
            }
            RolloverOutcome::Unreadable => {
                warn!(
                    "event=entry_append module=service status=degraded reason=run_unreadable entries={}",
                    run.len()
                );
                return Ok(run);
            }
            _ => {}
        }

        self.persist_run(&run, "entry_append");
        Ok(run)
    }

    /// Removes the entry at `index` from the persisted run.
    ///
    /// No day check is made: deletion edits the run already shown. A stale
    /// run still waiting for its archive is not today's run, so it is left
    /// alone and the delete acts on an empty run for today.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`; nothing is written.
    pub fn delete_entry(&self, index: usize) -> DailyLogResult<DailyRun> {
        let today = self.clock.today();
        let mut run = match self.repo.load_current_run() {
            Ok(Some(run)) if run.is_stale(today) => {
                warn!(
                    "event=entry_delete module=service status=degraded reason=archive_pending stale_date={}",
                    run.date
                );
                DailyRun::new(today)
            }
            Ok(Some(run)) => run,
            Ok(None) => DailyRun::new(today),
            Err(err) => {
                log_repo_error("entry_delete", &err);
                DailyRun::new(today)
            }
        };

        let len = run.len();
        if run.remove(index).is_none() {
            return Err(DailyLogError::IndexOutOfRange { index, len });
        }

        self.persist_run(&run, "entry_delete");
        Ok(run)
    }

    /// Archived days, newest first.
    pub fn history(&self) -> Vec<HistoryDay> {
        match self.repo.load_history() {
            Ok(history) => history.newest_first(),
            Err(err) => {
                log_repo_error("history_load", &err);
                Vec::new()
            }
        }
    }

    /// History list rows, newest first, labelled by archival position.
    pub fn history_summaries(&self) -> Vec<HistoryDaySummary> {
        let history = match self.repo.load_history() {
            Ok(history) => history,
            Err(err) => {
                log_repo_error("history_load", &err);
                return Vec::new();
            }
        };
        history
            .days()
            .iter()
            .enumerate()
            .rev()
            .map(|(position, day)| HistoryDaySummary {
                id: day.id,
                label: format!("Day {}", position + 1),
                date: day.date,
                entry_count: day.entries.len(),
            })
            .collect()
    }

    /// One archived day for read-only display.
    pub fn history_day(&self, id: DateKey) -> Option<HistoryDay> {
        match self.repo.load_history() {
            Ok(history) => history.get(id).cloned(),
            Err(err) => {
                log_repo_error("history_load", &err);
                None
            }
        }
    }

    fn check_day(&self, today: DateKey) -> (DailyRun, RolloverOutcome) {
        let persisted = match self.repo.load_current_run() {
            Ok(run) => run,
            Err(err) => {
                log_repo_error("run_load", &err);
                if preserves_unreadable_run(&err) {
                    return (DailyRun::new(today), RolloverOutcome::Unreadable);
                }
                None
            }
        };

        let Some(run) = persisted else {
            return (DailyRun::new(today), RolloverOutcome::UpToDate);
        };
        if !run.is_stale(today) {
            return (run, RolloverOutcome::UpToDate);
        }

        let stale_date = run.date;
        if run.is_empty() {
            if let Err(err) = self.repo.clear_current_run() {
                log_repo_error("run_rollover", &err);
            }
            info!(
                "event=run_rollover module=service status=ok action=discard_empty stale_date={} today={}",
                stale_date, today
            );
            return (
                DailyRun::new(today),
                RolloverOutcome::DiscardedEmpty { stale_date },
            );
        }

        let outcome = match self.archive(run) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    "event=run_archive module=service status=error error_code={} stale_date={} error={}",
                    err.code(),
                    stale_date,
                    err
                );
                RolloverOutcome::Deferred { stale_date }
            }
        };
        (DailyRun::new(today), outcome)
    }

    fn archive(&self, run: DailyRun) -> Result<RolloverOutcome, RepoError> {
        let date = run.date;
        let entry_count = run.len();

        // An unreadable history must not be replaced by a one-day history.
        let mut history = self.repo.load_history()?;
        let upsert = history.upsert(HistoryDay::from_run(run));
        self.repo.save_history(&history)?;

        if let Err(err) = self.repo.clear_current_run() {
            // The archived copy exists; a retry upserts the same day again.
            log_repo_error("run_archive", &err);
        }

        info!(
            "event=run_archive module=service status=ok date={} entries={} replaced={} history_len={}",
            date,
            entry_count,
            matches!(upsert, UpsertOutcome::Replaced { .. }),
            history.len()
        );
        Ok(RolloverOutcome::Archived {
            date,
            entry_count,
            upsert,
        })
    }

    fn persist_run(&self, run: &DailyRun, event: &str) {
        match self.repo.save_current_run(run) {
            Ok(()) => info!(
                "event={event} module=service status=ok date={} entries={}",
                run.date,
                run.len()
            ),
            Err(err) => log_repo_error(event, &err),
        }
    }
}

/// Read failures and newer formats may hide real entries. A malformed value
/// cannot be recovered and is replaced by the next write.
fn preserves_unreadable_run(err: &RepoError) -> bool {
    matches!(
        err,
        RepoError::Read { .. } | RepoError::UnsupportedFormatVersion { .. }
    )
}

fn log_repo_error(event: &str, err: &RepoError) {
    warn!(
        "event={event} module=service status=degraded error_code={} error={}",
        err.code(),
        err
    );
}
