//! Ledger report projections
//!
//! Shapes expenses and aggregates into `ReportTable`s. Pure data shaping:
//! nothing here touches storage.

use std::collections::BTreeMap;

use crate::models::{Expense, Money, MonthKey};
use crate::services::{MonthTotal, MonthlyTotals};

use super::table::{Cell, ReportRow, ReportTable};

const DETAIL_HEADERS: [&str; 3] = ["Date", "Description", "Amount"];

/// Expense rows of one month followed by a `Total` row
///
/// Rows keep the input order. The table is named `Expenses-YYYY-MM`.
pub fn expense_detail(month: MonthKey, expenses: &[Expense]) -> ReportTable {
    let mut table = ReportTable::new(format!("Expenses-{}", month), &DETAIL_HEADERS);

    for expense in expenses {
        table.push(detail_row(expense));
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    table.push(ReportRow::total(vec![
        Cell::Empty,
        Cell::text("Total"),
        Cell::Sum {
            value: total,
            rows: 0..expenses.len(),
        },
    ]));

    table
}

/// One detail table per month, oldest month first
///
/// Accepts expenses in any order; each table is named after its month and
/// lists that month's expenses oldest first.
pub fn detail_by_month(expenses: &[Expense]) -> Vec<ReportTable> {
    let mut by_month: BTreeMap<MonthKey, Vec<Expense>> = BTreeMap::new();
    for expense in expenses {
        by_month
            .entry(expense.month())
            .or_default()
            .push(expense.clone());
    }

    by_month
        .into_iter()
        .map(|(month, mut items)| {
            items.sort_by_key(|e| (e.created_at, e.id));
            let mut table = expense_detail(month, &items);
            table.name = month.to_string();
            table
        })
        .collect()
}

/// `Date | Total` per day with a `Monthly Total` row
pub fn daily_totals(totals: &MonthlyTotals) -> ReportTable {
    let mut table = ReportTable::new("Monthly Report", &["Date", "Total"]);

    for day in &totals.days {
        table.push(ReportRow::data(vec![
            Cell::Date(day.date),
            Cell::Money(day.total),
        ]));
    }

    table.push(ReportRow::total(vec![
        Cell::text("Monthly Total"),
        Cell::Sum {
            value: totals.total,
            rows: 0..totals.days.len(),
        },
    ]));

    table
}

/// Expense rows grouped by day
///
/// Each day is followed by a `Total (YYYY-MM-DD)` subtotal; the table ends
/// with a `Total (YYYY-MM)` row holding the month sum. Expenses are expected
/// oldest first.
pub fn daily_breakdown(month: MonthKey, expenses: &[Expense]) -> ReportTable {
    let mut table = ReportTable::new(month.to_string(), &DETAIL_HEADERS);
    let mut month_total = Money::zero();

    let mut start = 0;
    while start < expenses.len() {
        let day = expenses[start].date();
        let end = expenses[start..]
            .iter()
            .position(|e| e.date() != day)
            .map_or(expenses.len(), |offset| start + offset);

        let first_row = table.next_index();
        let mut day_total = Money::zero();
        for expense in &expenses[start..end] {
            table.push(detail_row(expense));
            day_total += expense.amount;
        }

        table.push(ReportRow::subtotal(vec![
            Cell::Empty,
            Cell::text(format!("Total ({})", day.format("%Y-%m-%d"))),
            Cell::Sum {
                value: day_total,
                rows: first_row..table.next_index(),
            },
        ]));

        month_total += day_total;
        start = end;
    }

    table.push(ReportRow::total(vec![
        Cell::Empty,
        Cell::text(format!("Total ({})", month)),
        Cell::Money(month_total),
    ]));

    table
}

/// `Month | Total Amount`, in the order given
pub fn monthly_summary(months: &[MonthTotal]) -> ReportTable {
    let mut table = ReportTable::new("Monthly Summary", &["Month", "Total Amount"]);

    for month in months {
        table.push(ReportRow::data(vec![
            Cell::text(month.month.to_string()),
            Cell::Money(month.total),
        ]));
    }

    table
}

fn detail_row(expense: &Expense) -> ReportRow {
    ReportRow::data(vec![
        Cell::Date(expense.date()),
        Cell::text(expense.description.clone()),
        Cell::Money(expense.amount),
    ])
}
