//! XLSX table writer
//!
//! One worksheet per table. Header, subtotal and total rows are bold; `Sum`
//! cells become `SUM` formulas with the precomputed value as cached result.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet};

use crate::error::ExpenseResult;
use crate::reports::{Cell, ReportRow, ReportTable, RowKind};

use super::TableWriter;

/// Excel limits sheet names to 31 characters
const MAX_SHEET_NAME: usize = 31;

const AMOUNT_FORMAT: &str = "0.00";

pub struct XlsxTableWriter {
    workbook: Workbook,
    path: PathBuf,
    plain: Format,
    bold: Format,
    amount: Format,
    bold_amount: Format,
}

impl XlsxTableWriter {
    /// Create a writer that saves to `path` on `finish`
    pub fn new(path: &Path) -> Self {
        Self {
            workbook: Workbook::new(),
            path: path.to_path_buf(),
            plain: Format::new(),
            bold: Format::new().set_bold(),
            amount: Format::new().set_num_format(AMOUNT_FORMAT),
            bold_amount: Format::new().set_bold().set_num_format(AMOUNT_FORMAT),
        }
    }
}

impl TableWriter for XlsxTableWriter {
    fn write_table(&mut self, table: &ReportTable) -> ExpenseResult<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(sheet_name(&table.name))?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &self.bold)?;
            worksheet.set_column_width(col as u16, if col == 1 { 30 } else { 14 })?;
        }

        for (index, row) in table.rows.iter().enumerate() {
            let emphasized = row.kind != RowKind::Data;
            let text_format = if emphasized { &self.bold } else { &self.plain };
            let amount_format = if emphasized {
                &self.bold_amount
            } else {
                &self.amount
            };

            write_row(
                worksheet,
                sheet_row(index),
                row,
                text_format,
                amount_format,
            )?;
        }

        Ok(())
    }

    fn finish(&mut self) -> ExpenseResult<()> {
        self.workbook.save(&self.path)?;
        Ok(())
    }
}

fn write_row(
    worksheet: &mut Worksheet,
    row_num: u32,
    row: &ReportRow,
    text_format: &Format,
    amount_format: &Format,
) -> ExpenseResult<()> {
    for (col, cell) in row.cells.iter().enumerate() {
        let col = col as u16;
        match cell {
            Cell::Text(text) => {
                worksheet.write_string_with_format(row_num, col, text, text_format)?;
            }
            Cell::Date(date) => {
                let text = date.format("%Y-%m-%d").to_string();
                worksheet.write_string_with_format(row_num, col, &text, text_format)?;
            }
            Cell::Money(value) => {
                worksheet.write_number_with_format(row_num, col, value.as_f64(), amount_format)?;
            }
            Cell::Sum { value, rows } if !rows.is_empty() => {
                let column = column_name(col);
                let formula = Formula::new(format!(
                    "=SUM({column}{}:{column}{})",
                    sheet_row(rows.start) + 1,
                    sheet_row(rows.end - 1) + 1
                ))
                .set_result(value.to_decimal_string());
                worksheet.write_formula_with_format(row_num, col, formula, amount_format)?;
            }
            Cell::Sum { value, .. } => {
                worksheet.write_number_with_format(row_num, col, value.as_f64(), amount_format)?;
            }
            Cell::Empty => {}
        }
    }
    Ok(())
}

/// Zero-based sheet row of a table row (row 0 holds the header)
fn sheet_row(index: usize) -> u32 {
    index as u32 + 1
}

/// Spreadsheet column letters for a zero-based column ("A", "B", ..., "AA")
fn column_name(col: u16) -> String {
    let mut n = u32::from(col) + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        name.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

/// Replace characters Excel rejects in sheet names and clamp the length
fn sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '-',
            other => other,
        })
        .take(MAX_SHEET_NAME)
        .collect();

    if cleaned.trim().is_empty() {
        "Sheet".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money, MonthKey, NewExpense};
    use crate::reports::{daily_breakdown, detail_by_month};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(2), "C");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
    }

    #[test]
    fn test_sheet_name() {
        assert_eq!(sheet_name("Expenses-2025-04"), "Expenses-2025-04");
        assert_eq!(sheet_name("a/b:c"), "a-b-c");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), MAX_SHEET_NAME);
        assert_eq!(sheet_name(""), "Sheet");
    }

    #[test]
    fn test_sheet_row_offsets_header() {
        // Table row 0 lands on spreadsheet row 2 ("C2")
        assert_eq!(sheet_row(0) + 1, 2);
    }

    #[test]
    fn test_saves_multiple_sheets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("all.xlsx");

        let at = |m: u32, d: u32| {
            NaiveDate::from_ymd_opt(2025, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        };
        let expenses = vec![
            NewExpense::new("rent", Money::from_cents(90000), at(3, 1)).with_id(ExpenseId::new(1)),
            NewExpense::new("coffee", Money::from_cents(350), at(4, 1)).with_id(ExpenseId::new(2)),
        ];

        let mut writer = XlsxTableWriter::new(&path);
        for table in detail_by_month(&expenses) {
            writer.write_table(&table).unwrap();
        }
        writer
            .write_table(&daily_breakdown(MonthKey::new(2025, 5).unwrap(), &[]))
            .unwrap();
        writer.finish().unwrap();

        assert!(path.exists());
    }
}
