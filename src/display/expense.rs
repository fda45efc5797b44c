//! Expense display formatting
//!
//! Tables for ledger and trash listings, and one-line summaries used in
//! command confirmations.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, TrashEntry};

use super::report::truncate;

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct TrashRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Deleted")]
    deleted_at: String,
}

/// Format expenses as a table
pub fn format_expense_list(expenses: &[Expense], datetime_format: &str, currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.get(),
        date: e.created_at.format(datetime_format).to_string(),
        description: truncate(&e.description, DESCRIPTION_WIDTH),
        amount: e.amount.format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .modify(Columns::single(0), Alignment::right())
        .modify(Columns::single(3), Alignment::right());

    format!("{}\n", table)
}

/// Format the trash, most recently deleted first
pub fn format_trash_list(entries: &[TrashEntry], datetime_format: &str, currency: &str) -> String {
    if entries.is_empty() {
        return "Trash is empty.\n".to_string();
    }

    let rows = entries.iter().map(|entry| TrashRow {
        id: entry.expense.id.get(),
        date: entry.expense.created_at.format(datetime_format).to_string(),
        description: truncate(&entry.expense.description, DESCRIPTION_WIDTH),
        amount: entry.expense.amount.format_with_symbol(currency),
        deleted_at: entry.deleted_at.format(datetime_format).to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .modify(Columns::single(0), Alignment::right())
        .modify(Columns::single(3), Alignment::right());

    format!("{}\n", table)
}

/// One-line summary: `#3 2025-04-01 09:00 coffee $3.50`
pub fn format_expense_line(expense: &Expense, datetime_format: &str, currency: &str) -> String {
    format!(
        "#{} {} {} {}",
        expense.id,
        expense.created_at.format(datetime_format),
        expense.description,
        expense.amount.format_with_symbol(currency)
    )
}
