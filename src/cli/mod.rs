//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod ledger;
pub mod report;

pub use export::{handle_export_command, ExportCommands};
pub use ledger::{handle_ledger_command, LedgerCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::expense;
use crate::models::{ExpenseId, MonthKey};

/// Parse a `YYYY-MM` argument
pub fn parse_month(input: &str) -> ExpenseResult<MonthKey> {
    MonthKey::parse(input).map_err(|e| ExpenseError::InvalidInput(e.to_string()))
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    expense::parse_date(input).ok_or_else(|| {
        ExpenseError::InvalidInput(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

/// Parse an expense id argument (`12` or `#12`)
pub fn parse_id(input: &str) -> ExpenseResult<ExpenseId> {
    input
        .parse()
        .map_err(|_| ExpenseError::InvalidInput(format!("Invalid expense id '{}'", input)))
}
