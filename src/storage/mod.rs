//! Storage layer for the expense ledger
//!
//! Owns the SQLite connection and the audit log. Repositories borrow the
//! connection, so they can run either directly or inside a transaction
//! opened with [`Storage::in_transaction`].

pub mod expenses;
pub mod schema;
pub mod trash;

pub use expenses::ExpenseRepository;
pub use trash::TrashRepository;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::ExpensePaths;
use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};

/// Main storage coordinator
pub struct Storage {
    conn: Connection,
    db_path: PathBuf,
    audit: AuditLogger,
}

impl Storage {
    /// Open the database configured for these paths and settings
    pub fn open(paths: &ExpensePaths, settings: &Settings) -> ExpenseResult<Self> {
        paths.ensure_directories()?;
        Self::open_at(settings.database_file(paths), paths.audit_log())
    }

    /// Open (or create) a database file and audit log at explicit locations
    pub fn open_at(db_path: PathBuf, audit_path: PathBuf) -> ExpenseResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ExpenseError::Io(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(&db_path).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to open database {}: {}",
                db_path.display(),
                e
            ))
        })?;

        schema::apply(&conn)?;
        log::debug!("Opened expense database at {}", db_path.display());

        Ok(Self {
            conn,
            db_path,
            audit: AuditLogger::new(audit_path),
        })
    }

    /// Path of the open database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Ledger rows on the main connection
    pub fn expenses(&self) -> ExpenseRepository<'_> {
        ExpenseRepository::new(&self.conn)
    }

    /// Trash rows on the main connection
    pub fn trash(&self) -> TrashRepository<'_> {
        TrashRepository::new(&self.conn)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Run `f` inside one SQL transaction
    ///
    /// Commits when `f` returns `Ok`; any error rolls everything back.
    pub fn in_transaction<T, F>(&self, f: F) -> ExpenseResult<T>
    where
        F: FnOnce(&Connection) -> ExpenseResult<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Append entries to the audit log
    ///
    /// The ledger change is already committed at this point, so a failing
    /// audit write is reported but not propagated.
    pub fn record_audit(&self, entries: &[AuditEntry]) {
        if let Err(e) = self.audit.log_batch(entries) {
            log::warn!("Failed to write audit log: {}", e);
        }
    }

    /// Close the connection, surfacing any error from SQLite
    pub fn close(self) -> ExpenseResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| ExpenseError::Storage(format!("Failed to close database: {}", e)))
    }
}
