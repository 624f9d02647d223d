//! Integration tests for the SQLite smoke-check and its binary.

use std::fs;
use std::process::Command;

use rusqlite::Connection;
use tempfile::TempDir;
use todo_vault_gateway::database::DEFAULT_DB_FILE;
use todo_vault_gateway::{run_smoke_check, DatabaseError};

fn table_count(path: &std::path::Path) -> i64 {
    let conn = Connection::open(path).unwrap();
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'test'",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn creates_file_and_marker_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE);
    assert!(!path.exists());

    let report = run_smoke_check(&path).unwrap();

    assert!(path.exists());
    assert_eq!(report.path, path);
    assert!(!report.table_existed);
    assert_eq!(table_count(&path), 1);
}

#[test]
fn second_run_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE);

    run_smoke_check(&path).unwrap();
    let report = run_smoke_check(&path).unwrap();

    assert!(report.table_existed);
    assert_eq!(table_count(&path), 1);
}

#[test]
fn existing_rows_survive_a_rerun() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE);
    run_smoke_check(&path).unwrap();

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute("INSERT INTO test (id) VALUES (1)", []).unwrap();
    }
    run_smoke_check(&path).unwrap();

    let conn = Connection::open(&path).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM test", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn missing_parent_directory_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join(DEFAULT_DB_FILE);

    let err = run_smoke_check(&path).unwrap_err();

    assert!(matches!(err, DatabaseError::Open { .. }), "got {err:?}");
    assert!(!path.exists());
}

#[test]
fn non_sqlite_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE);
    fs::write(&path, vec![b'x'; 4096]).unwrap();

    let err = run_smoke_check(&path).unwrap_err();

    assert!(
        matches!(err, DatabaseError::Open { .. } | DatabaseError::Schema { .. }),
        "got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// db-smoke-check binary
// ---------------------------------------------------------------------------

#[test]
fn binary_creates_db_in_working_directory() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_db-smoke-check"))
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Testing SQLite at:"));
    assert!(stdout.contains("Success! DB opened and written to."));
    assert_eq!(table_count(&dir.path().join(DEFAULT_DB_FILE)), 1);
}

#[test]
fn binary_reports_failure_without_failing_exit_code() {
    let dir = TempDir::new().unwrap();
    // A directory where the database file should be cannot be opened as SQLite
    fs::create_dir(dir.path().join(DEFAULT_DB_FILE)).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_db-smoke-check"))
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open DB"), "stderr: {stderr}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Success!"));
}
