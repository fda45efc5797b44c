//! Database schema setup
//!
//! The schema version is tracked in `PRAGMA user_version`.

use rusqlite::Connection;

use crate::error::{ExpenseError, ExpenseResult};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_created_at ON expenses(created_at);

CREATE TABLE IF NOT EXISTS trash (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id INTEGER NOT NULL UNIQUE,
    description TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    deleted_at TEXT NOT NULL
);
";

/// Read the schema version stored in the database file
pub fn schema_version(conn: &Connection) -> ExpenseResult<i32> {
    let version = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

/// Create tables and indexes if they do not exist yet
pub fn apply(conn: &Connection) -> ExpenseResult<()> {
    let version = schema_version(conn)?;

    if version > SCHEMA_VERSION {
        return Err(ExpenseError::Storage(format!(
            "Database schema version {} is newer than supported version {}",
            version, SCHEMA_VERSION
        )));
    }

    if version == SCHEMA_VERSION {
        return Ok(());
    }

    log::info!(
        "Upgrading database schema from version {} to {}",
        version,
        SCHEMA_VERSION
    );

    conn.execute_batch(SCHEMA_V1)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    Ok(())
}
