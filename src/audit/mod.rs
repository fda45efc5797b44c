//! Audit logging for the expense ledger
//!
//! Every ledger mutation (create, delete, restore) is appended to a
//! line-delimited JSON log together with the affected expense snapshot.
//!
//! - `AuditEntry`: a single entry with timestamp, operation and snapshot.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
