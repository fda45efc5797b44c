//! Export module for the expense ledger
//!
//! Writes report tables to files:
//! - CSV: plain decimals, header written once per distinct header
//! - XLSX: one worksheet per table with `SUM` formulas for totals

pub mod csv;
pub mod xlsx;

pub use self::csv::CsvTableWriter;
pub use self::xlsx::XlsxTableWriter;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::ReportTable;

/// Output file format
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Pick the format: explicit choice, then extension, then the fallback
    pub fn resolve(explicit: Option<Self>, path: &Path, fallback: Self) -> Self {
        explicit
            .or_else(|| Self::from_path(path))
            .unwrap_or(fallback)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// A sink for report tables
pub trait TableWriter {
    /// Append one table
    fn write_table(&mut self, table: &ReportTable) -> ExpenseResult<()>;

    /// Flush or save everything written so far
    fn finish(&mut self) -> ExpenseResult<()>;
}

/// Write tables to `path` in the given format
pub fn write_tables(path: &Path, format: ExportFormat, tables: &[ReportTable]) -> ExpenseResult<()> {
    let mut writer: Box<dyn TableWriter> = match format {
        ExportFormat::Csv => {
            let file = File::create(path).map_err(|e| {
                ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Box::new(CsvTableWriter::new(BufWriter::new(file)))
        }
        ExportFormat::Xlsx => Box::new(XlsxTableWriter::new(path)),
    };

    for table in tables {
        writer.write_table(table)?;
    }
    writer.finish()?;

    log::info!(
        "Exported {} table(s) to {} as {}",
        tables.len(),
        path.display(),
        format
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::reports::{Cell, ReportRow};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_table() -> ReportTable {
        let mut table = ReportTable::new("Monthly Summary", &["Month", "Total Amount"]);
        table.push(ReportRow::data(vec![
            Cell::text("2025-04"),
            Cell::Money(Money::from_cents(3550)),
        ]));
        table
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.CSV")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("report.xlsx")),
            Some(ExportFormat::Xlsx)
        );
        assert_eq!(ExportFormat::from_path(Path::new("report.txt")), None);
        assert_eq!(ExportFormat::from_path(Path::new("report")), None);
    }

    #[test]
    fn test_resolve_precedence() {
        let path = PathBuf::from("report.xlsx");
        assert_eq!(
            ExportFormat::resolve(Some(ExportFormat::Csv), &path, ExportFormat::Csv),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::resolve(None, &path, ExportFormat::Csv),
            ExportFormat::Xlsx
        );
        assert_eq!(
            ExportFormat::resolve(None, Path::new("report"), ExportFormat::Xlsx),
            ExportFormat::Xlsx
        );
    }

    #[test]
    fn test_write_tables_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("summary.csv");

        write_tables(&path, ExportFormat::Csv, &[sample_table()]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Month,Total Amount\n2025-04,35.50\n");
    }

    #[test]
    fn test_write_tables_xlsx() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("summary.xlsx");

        write_tables(&path, ExportFormat::Xlsx, &[sample_table()]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // XLSX files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("summary.csv");

        let err = write_tables(&path, ExportFormat::Csv, &[sample_table()]).unwrap_err();
        assert!(matches!(err, ExpenseError::Export(_)));
    }
}
