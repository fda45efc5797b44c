//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, the trash and aggregate
//! reports for terminal display.

pub mod expense;
pub mod report;

pub use expense::{format_expense_line, format_expense_list, format_trash_list};
pub use report::{format_daily_totals, format_day_total, format_monthly_summary};
