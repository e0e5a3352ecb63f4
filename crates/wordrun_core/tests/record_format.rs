use serde_json::Value;
use wordrun_core::db::open_db_in_memory;
use wordrun_core::{
    DailyLogRepository, DailyLogService, DailyRun, DateKey, Entry, FixedClock, History,
    HistoryDay, KeyValueStore, KvDailyLogRepository, RepoError, SqliteKeyValueStore,
    CURRENT_FORMAT_VERSION, CURRENT_RUN_KEY, HISTORY_KEY,
};

fn day(year: i32, month: u32, d: u32) -> DateKey {
    DateKey::from_ymd(year, month, d).unwrap()
}

#[test]
fn stored_values_carry_format_version() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let repo = KvDailyLogRepository::new(&store);

    let mut run = DailyRun::new(day(2024, 1, 1));
    run.push(Entry::new("apple", "/ˈæp.əl/"));
    repo.save_current_run(&run).unwrap();
    repo.save_history(&History::from_days(vec![HistoryDay::from_run(run.clone())]))
        .unwrap();

    let stored_run: Value =
        serde_json::from_str(&store.get_item(CURRENT_RUN_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored_run["format_version"], CURRENT_FORMAT_VERSION);
    assert_eq!(stored_run["date"], "2024-01-01");
    assert_eq!(stored_run["entries"][0]["word"], "apple");
    assert_eq!(stored_run["entries"][0]["phonetic"], "/ˈæp.əl/");

    let stored_history: Value =
        serde_json::from_str(&store.get_item(HISTORY_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored_history["format_version"], CURRENT_FORMAT_VERSION);
    assert_eq!(stored_history["days"][0]["id"], "2024-01-01");
    assert_eq!(stored_history["days"][0]["date"], "2024-01-01");

    assert_eq!(repo.load_current_run().unwrap(), Some(run));
}

#[test]
fn legacy_unversioned_values_are_read() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    store
        .set_item(
            CURRENT_RUN_KEY,
            r#"{"date":"2024-01-01","entries":[{"word":"apple","phonetic":"/ˈæp.əl/"}]}"#,
        )
        .unwrap();
    store
        .set_item(
            HISTORY_KEY,
            r#"[{"id":"2023-12-31","date":"2023-12-31","entries":[{"word":"pear","phonetic":""}]}]"#,
        )
        .unwrap();

    let clock = FixedClock::new(day(2024, 1, 2));
    let service = DailyLogService::new(KvDailyLogRepository::new(&store), &clock);
    assert_eq!(service.current_run(), DailyRun::new(day(2024, 1, 2)));

    let history = service.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, day(2024, 1, 1));
    assert_eq!(history[1].entries, vec![Entry::new("pear", "")]);

    // Rewritten in the versioned layout.
    let stored: Value =
        serde_json::from_str(&store.get_item(HISTORY_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored["format_version"], CURRENT_FORMAT_VERSION);
}

#[test]
fn newer_format_version_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    store
        .set_item(
            CURRENT_RUN_KEY,
            r#"{"format_version":99,"date":"2024-01-01","entries":[]}"#,
        )
        .unwrap();
    let repo = KvDailyLogRepository::new(&store);

    match repo.load_current_run().unwrap_err() {
        RepoError::UnsupportedFormatVersion {
            key,
            found,
            latest_supported,
        } => {
            assert_eq!(key, CURRENT_RUN_KEY);
            assert_eq!(found, 99);
            assert_eq!(latest_supported, CURRENT_FORMAT_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn newer_format_run_survives_append() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let newer = r#"{"format_version":2,"date":"2024-01-02","entries":[{"word":"a","phonetic":""},{"word":"b","phonetic":""}]}"#;
    store.set_item(CURRENT_RUN_KEY, newer).unwrap();

    let clock = FixedClock::new(day(2024, 1, 2));
    let service = DailyLogService::new(KvDailyLogRepository::new(&store), &clock);

    let run = service.append_entry("c", "").unwrap();
    assert_eq!(run.entries, vec![Entry::new("c", "")]);
    assert_eq!(store.get_item(CURRENT_RUN_KEY).unwrap().as_deref(), Some(newer));
}

#[test]
fn locale_formatted_dates_are_parse_errors() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    store
        .set_item(CURRENT_RUN_KEY, r#"{"date":"1/2/2024","entries":[]}"#)
        .unwrap();
    let repo = KvDailyLogRepository::new(&store);

    let err = repo.load_current_run().unwrap_err();
    assert!(matches!(err, RepoError::Parse { key, .. } if key == CURRENT_RUN_KEY));
    assert_eq!(err.code(), "parse_failed");
}

#[test]
fn missing_records_load_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDailyLogRepository::new(SqliteKeyValueStore::new(&conn));
    assert_eq!(repo.load_current_run().unwrap(), None);
    assert!(repo.load_history().unwrap().is_empty());

    repo.clear_current_run().unwrap();
}
