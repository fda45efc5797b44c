//! Reports module for the expense ledger
//!
//! Projects ledger data and aggregates into named tables (headers, data rows,
//! subtotal and total rows) that the export writers turn into files.

pub mod ledger;
pub mod table;

pub use ledger::{daily_breakdown, daily_totals, detail_by_month, expense_detail, monthly_summary};
pub use table::{Cell, ReportRow, ReportTable, RowKind};
