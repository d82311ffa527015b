use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

use crate::config::{ensure_webview_data_dir, AppConfig};
use crate::domain::entities::record::{Record, Value};
use crate::domain::entities::schema::Schema;
use crate::domain::entities::view::SortDirection;
use crate::infra::import::quiz_bank::read_question_bank;
use crate::infra::import::FileSource;
use crate::infra::sqlite::kv_store::SqliteKvStore;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::quiz::{clear_results, load_recent, open_history, record_result};
use crate::usecase::ports::kv::KeyValueStore;
use crate::usecase::ports::source::{DatasetSource, LoadError};
use crate::usecase::services::quiz_history::{
    QuizHistoryEntry, QuizHistoryService, QUIZ_HISTORY_KEY,
};
use crate::usecase::services::view_session::{LoadOutcome, SessionPhase, ViewSession};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("leaderboard-{prefix}-{nanos}"))
}

fn players_json(count: usize) -> String {
    let players: Vec<String> = (0..count)
        .map(|idx| {
            format!(
                r#"{{"name": "Player {idx}", "score": {}, "level": {}, "country": "{}", "joinDate": "2024-01-{:02}"}}"#,
                10_000 - idx * 100,
                idx % 5 + 1,
                if idx % 2 == 0 { "Canada" } else { "Japan" },
                idx % 28 + 1
            )
        })
        .collect();
    format!("[{}]", players.join(",\n"))
}

fn raw_players(count: usize) -> Vec<Record> {
    (0..count)
        .map(|idx| {
            Record::new()
                .with("name", Value::Text(format!("Player {idx}")))
                .with("score", Value::Number((1000 - idx) as f64))
                .with("level", Value::Number(1.0))
        })
        .collect()
}

fn write_players(dir: &Path, count: usize) -> PathBuf {
    let path = dir.join("leaderboard.json");
    fs::write(&path, players_json(count)).expect("should write dataset file");
    path
}

fn history_entry(name: &str, score: usize) -> QuizHistoryEntry {
    QuizHistoryEntry {
        name: name.to_string(),
        score,
        total: 5,
        seconds: 42,
        recorded_at: "2024-05-01 10:00".to_string(),
    }
}

#[test]
fn kv_store_creates_table_and_overwrites_keys() {
    let temp_dir = unique_test_dir("kv-store");
    let db_path = temp_dir.join("app.sqlite");

    let store = SqliteKvStore::open(db_path.clone()).expect("store should open");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1, "kv_store table should exist");

    assert_eq!(store.get("missing").expect("get should succeed"), None);
    store.set("key", b"first").expect("set should succeed");
    store.set("key", b"second").expect("overwrite should succeed");
    assert_eq!(
        store.get("key").expect("get should succeed").as_deref(),
        Some(&b"second"[..])
    );

    store.remove("key").expect("remove should succeed");
    assert_eq!(store.get("key").expect("get should succeed"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn kv_store_values_survive_reopen() {
    let temp_dir = unique_test_dir("kv-reopen");
    let db_path = temp_dir.join("app.sqlite");

    SqliteKvStore::open(db_path.clone())
        .expect("store should open")
        .set("greeting", b"hello")
        .expect("set should succeed");

    let reopened = SqliteKvStore::open(db_path).expect("store should reopen");
    assert_eq!(
        reopened.get("greeting").expect("get should succeed"),
        Some(b"hello".to_vec())
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn quiz_history_lists_newest_first_and_clears() {
    let temp_dir = unique_test_dir("quiz-history");
    let store = SqliteKvStore::open(temp_dir.join("app.sqlite")).expect("store should open");
    let history = QuizHistoryService::new(Arc::new(store));

    assert!(history.entries().expect("entries should load").is_empty());
    history.record(history_entry("ada", 3)).expect("record should succeed");
    history.record(history_entry("alan", 4)).expect("record should succeed");
    history.record(history_entry("grace", 5)).expect("record should succeed");

    let recent = history.recent(2).expect("recent should load");
    let names: Vec<&str> = recent.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["grace", "alan"]);
    assert_eq!(history.entries().expect("entries should load").len(), 3);

    history.clear().expect("clear should succeed");
    assert!(history.recent(10).expect("recent should load").is_empty());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn quiz_history_keeps_unreadable_blob_until_cleared() {
    let temp_dir = unique_test_dir("quiz-history-corrupt");
    let store =
        Arc::new(SqliteKvStore::open(temp_dir.join("app.sqlite")).expect("store should open"));
    store
        .set(QUIZ_HISTORY_KEY, b"not json")
        .expect("set should succeed");
    let history = QuizHistoryService::new(store.clone());

    assert!(history.entries().is_err());
    assert!(history.record(history_entry("ada", 1)).is_err());
    assert_eq!(
        store.get(QUIZ_HISTORY_KEY).expect("get should succeed"),
        Some(b"not json".to_vec()),
        "unreadable history must not be overwritten"
    );

    history.clear().expect("clear should succeed");
    history.record(history_entry("ada", 1)).expect("record should succeed");
    assert_eq!(history.entries().expect("entries should load").len(), 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn json_source_loads_and_session_shows_first_page() {
    let temp_dir = unique_test_dir("json-load");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = write_players(&temp_dir, 30);
    let mut session = ViewSession::new(Schema::leaderboard(), 25);

    let outcome = session.load_from(&FileSource::new(path, Schema::leaderboard()));

    assert_eq!(outcome, LoadOutcome::Applied);
    assert_eq!(session.phase(), &SessionPhase::Ready);
    let model = session.view_model();
    assert_eq!(model.rows.len(), 25);
    assert_eq!(model.total_pages, 2);
    assert_eq!(model.total_count, 30);
    assert_eq!(model.rows[0].display_rank, 1);
    assert_eq!(model.rows[0].record.get("name"), &Value::Text("Player 0".to_string()));
    assert_eq!(model.rows[0].record.get("first_name"), &Value::Text("Player".to_string()));
    assert_eq!(model.rows[0].record.get("last_name"), &Value::Text("0".to_string()));
    assert!(model.rows[0].record.get("join_date").as_date().is_some());
    assert!(!model.navigation.prev);
    assert!(model.navigation.next);
    assert!(model.error.is_none());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_source_normalizes_headers() {
    let temp_dir = unique_test_dir("csv-load");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("players.csv");
    fs::write(
        &path,
        "Name,Score,Level,Country,Join Date\nAda Lovelace,\"1,200\",7,UK,2023-04-01\nAlan Turing,980,5,UK,\n",
    )
    .expect("should write csv");

    let records = FileSource::new(path, Schema::leaderboard())
        .load()
        .expect("csv should load");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("score"), &Value::Number(1200.0));
    assert!(records[0].get("join_date").as_date().is_some());
    assert!(records[1].get("join_date").is_empty());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn file_source_reports_transport_and_parse_failures() {
    let temp_dir = unique_test_dir("source-errors");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let missing = FileSource::new(temp_dir.join("missing.json"), Schema::leaderboard()).load();
    assert!(matches!(missing, Err(LoadError::Transport(_))), "{missing:?}");

    let text_path = temp_dir.join("notes.txt");
    fs::write(&text_path, "hello").expect("should write file");
    let unsupported = FileSource::new(text_path, Schema::leaderboard()).load();
    assert!(matches!(unsupported, Err(LoadError::Parse(_))), "{unsupported:?}");

    let bad_path = temp_dir.join("broken.json");
    fs::write(&bad_path, "{\"players\": 3}").expect("should write file");
    let malformed = FileSource::new(bad_path, Schema::leaderboard()).load();
    assert!(matches!(malformed, Err(LoadError::Parse(_))), "{malformed:?}");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn failed_reload_keeps_rows_and_reports_error() {
    let temp_dir = unique_test_dir("reload-failure");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = write_players(&temp_dir, 30);
    let mut session = ViewSession::new(Schema::leaderboard(), 25);
    session.load_from(&FileSource::new(path, Schema::leaderboard()));

    let outcome = session.load_from(&FileSource::new(
        temp_dir.join("gone.json"),
        Schema::leaderboard(),
    ));

    assert_eq!(outcome, LoadOutcome::Failed);
    let model = session.view_model();
    assert_eq!(model.rows.len(), 25);
    assert!(matches!(model.error, Some(LoadError::Transport(_))));

    session.set_query("Japan");
    let model = session.view_model();
    assert_eq!(model.filtered_count, 15);
    assert!(model.error.is_some(), "error stays until a load succeeds");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn first_load_failure_shows_empty_table_with_error() {
    let mut session = ViewSession::new(Schema::leaderboard(), 25);
    let ticket = session.begin_load();

    let outcome = session.complete_load(ticket, Err(LoadError::Parse("bad payload".to_string())));

    assert_eq!(outcome, LoadOutcome::Failed);
    let model = session.view_model();
    assert!(model.rows.is_empty());
    assert_eq!(model.total_pages, 1);
    assert!(!model.loading);
    assert_eq!(model.error, Some(LoadError::Parse("bad payload".to_string())));
}

#[test]
fn newer_load_supersedes_older_one() {
    let mut session = ViewSession::new(Schema::leaderboard(), 25);
    let older = session.begin_load();
    let newer = session.begin_load();

    assert_eq!(session.complete_load(older, Ok(raw_players(3))), LoadOutcome::Stale);
    assert!(session.view_model().loading);
    assert_eq!(session.complete_load(newer, Ok(raw_players(5))), LoadOutcome::Applied);

    assert_eq!(session.view_model().total_count, 5);
    assert!(!session.view_model().loading);
}

#[test]
fn completion_after_teardown_is_discarded() {
    let mut session = ViewSession::new(Schema::leaderboard(), 25);
    let ticket = session.begin_load();

    session.teardown();

    assert_eq!(session.complete_load(ticket, Ok(raw_players(5))), LoadOutcome::Discarded);
    assert!(session.is_torn_down());
    assert!(session.dataset().is_empty());
    session.set_query("Player");
    assert_eq!(session.state().filter_query, "");
}

#[test]
fn controllers_drive_the_session_page() {
    let mut session = ViewSession::new(Schema::leaderboard(), 25);
    let ticket = session.begin_load();
    session.complete_load(ticket, Ok(raw_players(30)));

    session.next_page();
    assert_eq!(session.state().page_index, 1);
    assert_eq!(session.view_model().rows.len(), 5);
    assert_eq!(session.view_model().rows[0].display_rank, 26);

    session.go_to(7);
    assert_eq!(session.state().page_index, 1, "out-of-range page is ignored");

    session.set_query("player 2");
    assert_eq!(session.state().page_index, 0, "filter resets the page");
    assert_eq!(session.view_model().filtered_count, 11);

    session.clear_query();
    session.set_page_size(0);
    assert_eq!(session.state().page_size, 25, "zero page size is ignored");
    session.set_page_size(10);
    session.last_page();
    assert_eq!(session.view_model().total_pages, 3);
    assert_eq!(session.state().page_index, 2);

    session.toggle_sort("score");
    assert_eq!(session.state().sort_direction, SortDirection::Asc);
    assert_eq!(session.state().page_index, 0);
    let names: Vec<String> = session
        .view_model()
        .rows
        .iter()
        .take(2)
        .map(|row| row.record.get("name").to_string())
        .collect();
    assert_eq!(names, vec!["Player 29", "Player 28"]);

    session.toggle_sort("no_such_field");
    assert_eq!(session.state().sort_field.as_deref(), Some("score"));
}

#[test]
fn shrinking_reload_clamps_page_index() {
    let mut session = ViewSession::new(Schema::leaderboard(), 10);
    let ticket = session.begin_load();
    session.complete_load(ticket, Ok(raw_players(30)));
    session.last_page();
    assert_eq!(session.state().page_index, 2);

    let ticket = session.begin_load();
    session.complete_load(ticket, Ok(raw_players(12)));

    assert_eq!(session.state().page_index, 1);
    assert_eq!(session.view_model().rows.len(), 2);
}

#[test]
fn question_bank_falls_back_to_builtin_questions() {
    let temp_dir = unique_test_dir("question-bank");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let builtin = read_question_bank(&temp_dir.join("missing.json")).expect("fallback bank");
    assert!(!builtin.is_empty());

    let custom = temp_dir.join("questions.json");
    fs::write(
        &custom,
        r#"[{"question": "2 + 2?", "choices": ["3", "4"], "answer": "4"}]"#,
    )
    .expect("should write bank");
    let bank = read_question_bank(&custom).expect("bank should parse");
    assert_eq!(bank.len(), 1);
    assert_eq!(bank[0].text, "2 + 2?");

    let broken = temp_dir.join("broken.json");
    fs::write(&broken, "[]").expect("should write bank");
    assert!(read_question_bank(&broken).is_err());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn run_blocking_returns_closure_result_from_runtime() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build");
    let source_path = unique_test_dir("blocking").join("missing.json");

    let result = runtime
        .block_on(run_blocking(move || {
            FileSource::new(source_path, Schema::leaderboard()).load()
        }))
        .expect("blocking task should finish");

    assert!(matches!(result, Err(LoadError::Transport(_))), "{result:?}");
}

#[test]
fn quiz_history_round_trips_on_the_blocking_pool() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build");
    let temp_dir = unique_test_dir("quiz-history-blocking");
    let db_path = temp_dir.join("app.sqlite");

    runtime.block_on(async {
        let history = open_history(db_path.clone())
            .await
            .expect("history should open");
        assert!(load_recent(history.clone())
            .await
            .expect("recent should load")
            .is_empty());

        record_result(history.clone(), history_entry("ada", 3))
            .await
            .expect("record should succeed");
        let recent = record_result(history.clone(), history_entry("bob", 4))
            .await
            .expect("record should succeed");
        let names: Vec<&str> = recent.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "ada"]);

        clear_results(history.clone())
            .await
            .expect("clear should succeed");
        assert!(load_recent(history)
            .await
            .expect("recent should load")
            .is_empty());
    });

    assert!(db_path.exists());
    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn quiz_history_save_reports_unreadable_blob() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build");
    let temp_dir = unique_test_dir("quiz-history-blocking-corrupt");
    let db_path = temp_dir.join("app.sqlite");
    SqliteKvStore::open(db_path.clone())
        .expect("store should open")
        .set(QUIZ_HISTORY_KEY, b"{")
        .expect("set should succeed");

    let result = runtime.block_on(async {
        let history = open_history(db_path).await.expect("history should open");
        record_result(history, history_entry("ada", 1)).await
    });

    let message = format!("{:#}", result.expect_err("save should fail"));
    assert!(message.contains("unreadable"), "{message}");
    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn app_config_parses_and_sanitizes() {
    let config = AppConfig::parse(
        r#"
        data_path = "/tmp/players.csv"
        page_size = 0
        page_size_options = [50, 0, 10, 10]
        "#,
    )
    .expect("config should parse");

    assert_eq!(config.data_path, Some(PathBuf::from("/tmp/players.csv")));
    assert_eq!(config.page_size, 25);
    assert_eq!(config.page_size_options, vec![10, 25, 50]);

    let defaults = AppConfig::parse("").expect("empty config should parse");
    assert_eq!(defaults, AppConfig::default());
    assert!(AppConfig::parse("page_size = \"big\"").is_err());
}

#[test]
fn app_config_missing_file_means_defaults() {
    let temp_dir = unique_test_dir("config-missing");
    let config = AppConfig::load(&temp_dir.join("config.toml")).expect("defaults");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn ensure_webview_data_dir_creates_directory() {
    let temp_dir = unique_test_dir("webview");

    let webview_dir = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

    assert_eq!(webview_dir, temp_dir.join("webview"));
    assert!(webview_dir.is_dir());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
