//! Tabular report shape shared by every export writer

use std::ops::Range;

use chrono::NaiveDate;

use crate::models::Money;

/// Role of a row within a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A plain data row
    Data,
    /// Sum over a group of data rows (e.g. one day)
    Subtotal,
    /// Grand total of the table
    Total,
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Date(NaiveDate),
    Money(Money),
    /// Sum of the same column over `rows` (indices into `ReportTable::rows`)
    ///
    /// `value` is the precomputed result so writers without formulas can
    /// emit it directly.
    Sum { value: Money, rows: Range<usize> },
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Numeric value of the cell, if it has one
    pub fn amount(&self) -> Option<Money> {
        match self {
            Cell::Money(value) | Cell::Sum { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Plain-text rendering (amounts as bare decimals)
    pub fn to_plain_string(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Date(date) => date.format("%Y-%m-%d").to_string(),
            Cell::Money(value) | Cell::Sum { value, .. } => value.to_decimal_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// One row of a report table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl ReportRow {
    pub fn data(cells: Vec<Cell>) -> Self {
        Self {
            kind: RowKind::Data,
            cells,
        }
    }

    pub fn subtotal(cells: Vec<Cell>) -> Self {
        Self {
            kind: RowKind::Subtotal,
            cells,
        }
    }

    pub fn total(cells: Vec<Cell>) -> Self {
        Self {
            kind: RowKind::Total,
            cells,
        }
    }

    pub fn is_data(&self) -> bool {
        self.kind == RowKind::Data
    }
}

/// A named table: headers plus rows
///
/// Each table becomes one worksheet in a workbook, or one header block in a
/// CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn new(name: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    /// Index the next pushed row will get
    pub fn next_index(&self) -> usize {
        self.rows.len()
    }

    /// Rows that are neither subtotals nor totals
    pub fn data_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| row.is_data())
    }

    /// The last total row, if any
    pub fn total_row(&self) -> Option<&ReportRow> {
        self.rows.iter().rev().find(|row| row.kind == RowKind::Total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strings() {
        assert_eq!(Cell::text("lunch").to_plain_string(), "lunch");
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()).to_plain_string(),
            "2025-04-01"
        );
        assert_eq!(Cell::Money(Money::from_cents(-1205)).to_plain_string(), "-12.05");
        assert_eq!(
            Cell::Sum {
                value: Money::from_cents(3550),
                rows: 0..3
            }
            .to_plain_string(),
            "35.50"
        );
        assert_eq!(Cell::Empty.to_plain_string(), "");
    }

    #[test]
    fn test_amount() {
        assert_eq!(Cell::Money(Money::from_cents(5)).amount(), Some(Money::from_cents(5)));
        assert_eq!(Cell::text("x").amount(), None);
    }

    #[test]
    fn test_table_rows() {
        let mut table = ReportTable::new("t", &["A", "B"]);
        table.push(ReportRow::data(vec![Cell::text("a"), Cell::Money(Money::from_cents(1))]));
        table.push(ReportRow::total(vec![Cell::text("Total"), Cell::Money(Money::from_cents(1))]));

        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.data_rows().count(), 1);
        assert_eq!(table.next_index(), 2);
        assert!(table.total_row().is_some());
    }
}
