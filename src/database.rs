// Local SQLite smoke-check: open (or create) the database file and ensure the marker table

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Database file name, resolved against the current working directory
pub const DEFAULT_DB_FILE: &str = "todo.db";

/// Marker table proving the file accepts schema writes
pub const MARKER_TABLE: &str = "test";

const CREATE_MARKER_TABLE: &str = "CREATE TABLE IF NOT EXISTS test (id INTEGER PRIMARY KEY)";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to resolve working directory: {0}")]
    WorkingDir(#[from] std::io::Error),

    #[error("Failed to open DB at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Failed to write schema to {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Failed to close DB at {}: {source}", path.display())]
    Close {
        path: PathBuf,
        source: rusqlite::Error,
    },
}

/// Outcome of a successful smoke-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeCheckReport {
    pub path: PathBuf,
    /// The marker table was already there before this run
    pub table_existed: bool,
}

/// `todo.db` in the current working directory.
pub fn default_db_path() -> Result<PathBuf, DatabaseError> {
    Ok(std::env::current_dir()?.join(DEFAULT_DB_FILE))
}

fn marker_table_exists(conn: &Connection) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        rusqlite::params![MARKER_TABLE],
        |row| row.get::<_, i64>(0),
    )
    .map(|count| count > 0)
}

/// Open (creating if absent) the database at `path`, ensure the marker table
/// exists, and close the handle.
///
/// Idempotent. The connection is dropped on every early return, so the file
/// handle never outlives the call.
pub fn run_smoke_check(path: &Path) -> Result<SmokeCheckReport, DatabaseError> {
    let conn = Connection::open(path).map_err(|source| DatabaseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Opened SQLite database at {}", path.display());

    let schema_err = |source| DatabaseError::Schema {
        path: path.to_path_buf(),
        source,
    };

    let table_existed = marker_table_exists(&conn).map_err(schema_err)?;
    conn.execute_batch(CREATE_MARKER_TABLE).map_err(schema_err)?;

    conn.close().map_err(|(_, source)| DatabaseError::Close {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Smoke-check passed for {} (marker table {})",
        path.display(),
        if table_existed { "already present" } else { "created" }
    );

    Ok(SmokeCheckReport {
        path: path.to_path_buf(),
        table_existed,
    })
}
