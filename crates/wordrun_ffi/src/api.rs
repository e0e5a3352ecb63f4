//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level journal functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` and `message`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the configured database, so no connection outlives a
//!   call and the UI thread never shares SQLite state.

use log::error;
use std::sync::OnceLock;
use wordrun_core::db::open_db;
use wordrun_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, DailyLogError, DailyLogService, DailyRun, DateKey, Entry, HistoryDay,
    KvDailyLogRepository, SqliteKeyValueStore, SystemClock,
};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One recorded word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryItem {
    pub word: String,
    pub phonetic: String,
}

/// Current day's run, or an archived day opened read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSnapshot {
    /// Calendar day as `YYYY-MM-DD`.
    pub date: String,
    pub entries: Vec<EntryItem>,
}

/// Response envelope for run commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Run after the operation; `None` on failure.
    pub run: Option<RunSnapshot>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl RunResponse {
    fn success(message: impl Into<String>, run: &DailyRun) -> Self {
        Self {
            ok: true,
            run: Some(RunSnapshot {
                date: run.date.to_string(),
                entries: run.entries.iter().map(to_entry_item).collect(),
            }),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            run: None,
            message: message.into(),
        }
    }
}

/// One row of the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub id: String,
    /// `Day N` by archival position.
    pub label: String,
    pub date: String,
    pub entry_count: u32,
}

/// Response envelope for the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryResponse {
    /// Newest first.
    pub items: Vec<HistoryItem>,
    pub message: String,
}

/// Returns today's run, archiving a stale run first.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Call on every screen focus.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn run_current() -> RunResponse {
    match with_service(|service| Ok(service.current_run())) {
        Ok(run) => RunResponse::success(run_message(&run), &run),
        Err(err) => RunResponse::failure(format!("run_current failed: {err}")),
    }
}

/// Appends a word to today's run.
///
/// Input is trimmed; a blank word is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn run_append_entry(word: String, phonetic: String) -> RunResponse {
    let word = word.trim().to_string();
    let phonetic = phonetic.trim().to_string();
    match with_service(|service| service.append_entry(word, phonetic)) {
        Ok(run) => RunResponse::success("Entry added.", &run),
        Err(err) => RunResponse::failure(format!("run_append_entry failed: {err}")),
    }
}

/// Removes the entry at `index` from the current run.
///
/// Negative indices are rejected as out of range.
#[flutter_rust_bridge::frb(sync)]
pub fn run_delete_entry(index: i64) -> RunResponse {
    let Ok(index) = usize::try_from(index) else {
        return RunResponse::failure(format!(
            "run_delete_entry failed: entry index {index} out of range"
        ));
    };
    match with_service(|service| service.delete_entry(index)) {
        Ok(run) => RunResponse::success("Entry deleted.", &run),
        Err(err) => RunResponse::failure(format!("run_delete_entry failed: {err}")),
    }
}

/// Lists archived days, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn history_list() -> HistoryResponse {
    match with_service(|service| Ok(service.history_summaries())) {
        Ok(summaries) => {
            let items = summaries
                .into_iter()
                .map(|summary| HistoryItem {
                    id: summary.id.to_string(),
                    label: summary.label,
                    date: summary.date.to_string(),
                    entry_count: u32::try_from(summary.entry_count).unwrap_or(u32::MAX),
                })
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No archived days.".to_string()
            } else {
                format!("Found {} day(s).", items.len())
            };
            HistoryResponse { items, message }
        }
        Err(err) => HistoryResponse {
            items: Vec::new(),
            message: format!("history_list failed: {err}"),
        },
    }
}

/// Opens one archived day by its `YYYY-MM-DD` id.
#[flutter_rust_bridge::frb(sync)]
pub fn history_open_day(id: String) -> RunResponse {
    let key = match id.parse::<DateKey>() {
        Ok(key) => key,
        Err(err) => return RunResponse::failure(format!("history_open_day failed: {err}")),
    };
    match with_service(|service| Ok(service.history_day(key))) {
        Ok(Some(day)) => archived_response(&day),
        Ok(None) => RunResponse::failure(format!("history_open_day failed: no day `{id}`")),
        Err(err) => RunResponse::failure(format!("history_open_day failed: {err}")),
    }
}

fn archived_response(day: &HistoryDay) -> RunResponse {
    RunResponse {
        ok: true,
        run: Some(RunSnapshot {
            date: day.date.to_string(),
            entries: day.entries.iter().map(to_entry_item).collect(),
        }),
        message: format!("{} word(s).", day.entries.len()),
    }
}

fn run_message(run: &DailyRun) -> String {
    if run.is_empty() {
        "No words yet today.".to_string()
    } else {
        format!("{} word(s) today.", run.len())
    }
}

fn to_entry_item(entry: &Entry) -> EntryItem {
    EntryItem {
        word: entry.word.clone(),
        phonetic: entry.phonetic.clone(),
    }
}

fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

fn with_service<T>(
    f: impl FnOnce(
        &DailyLogService<KvDailyLogRepository<SqliteKeyValueStore<'_>>, SystemClock>,
    ) -> Result<T, DailyLogError>,
) -> Result<T, String> {
    let conn = open_db(&config().db_path).map_err(|err| {
        error!("event=ffi_call module=ffi status=error error_code=db_open_failed error={err}");
        format!("journal DB open failed: {err}")
    })?;
    let service = DailyLogService::new(
        KvDailyLogRepository::new(SqliteKeyValueStore::new(&conn)),
        SystemClock,
    );
    f(&service).map_err(|err| err.to_string())
}
