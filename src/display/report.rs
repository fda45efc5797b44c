//! Report formatting utilities for terminal output
//!
//! Provides formatting for aggregate views plus shared text helpers.

use chrono::NaiveDate;

use crate::models::Money;
use crate::services::{MonthTotal, MonthlyTotals};

const REPORT_WIDTH: usize = 32;

/// Per-day totals of a month with the month total underneath
pub fn format_daily_totals(totals: &MonthlyTotals, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Daily totals for {}\n", totals.month));
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    if totals.is_empty() {
        output.push_str("No expenses recorded.\n");
        return output;
    }

    for day in &totals.days {
        output.push_str(&format!(
            "{}{}\n",
            left_align(&day.date.format("%Y-%m-%d").to_string(), 12),
            right_align(&day.total.format_with_symbol(currency), REPORT_WIDTH - 12)
        ));
    }

    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{}{}\n",
        left_align("Total", 12),
        right_align(&totals.total.format_with_symbol(currency), REPORT_WIDTH - 12)
    ));

    output
}

/// Per-month totals, in the order given
pub fn format_monthly_summary(months: &[MonthTotal], currency: &str) -> String {
    if months.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{}{}\n",
        left_align("Month", 12),
        right_align("Total", REPORT_WIDTH - 12)
    ));
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    for month in months {
        output.push_str(&format!(
            "{}{}\n",
            left_align(&month.month.to_string(), 12),
            right_align(&month.total.format_with_symbol(currency), REPORT_WIDTH - 12)
        ));
    }

    output
}

/// Total spent on a single day
pub fn format_day_total(date: NaiveDate, total: Money, currency: &str) -> String {
    format!(
        "Total spent on {}: {}\n",
        date.format("%Y-%m-%d"),
        total.format_with_symbol(currency)
    )
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum length (in characters) with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Right-align text in a field of given width
pub fn right_align(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Left-align text in a field of given width
pub fn left_align(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}
