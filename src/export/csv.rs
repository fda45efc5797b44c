//! CSV table writer

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{Cell, ReportTable};

use super::TableWriter;

/// Writes report tables as CSV records
///
/// Consecutive tables sharing a header are written as one block; a new
/// header line starts whenever the header changes.
pub struct CsvTableWriter<W: Write> {
    writer: csv::Writer<W>,
    last_headers: Option<Vec<String>>,
}

impl<W: Write> CsvTableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().flexible(true).from_writer(inner),
            last_headers: None,
        }
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> ExpenseResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| ExpenseError::Export(format!("Failed to flush CSV output: {}", e)))
    }
}

impl<W: Write> TableWriter for CsvTableWriter<W> {
    fn write_table(&mut self, table: &ReportTable) -> ExpenseResult<()> {
        if self.last_headers.as_ref() != Some(&table.headers) {
            self.writer.write_record(&table.headers)?;
            self.last_headers = Some(table.headers.clone());
        }

        for row in &table.rows {
            self.writer
                .write_record(row.cells.iter().map(Cell::to_plain_string))?;
        }

        Ok(())
    }

    fn finish(&mut self) -> ExpenseResult<()> {
        self.writer
            .flush()
            .map_err(|e| ExpenseError::Export(format!("Failed to flush CSV output: {}", e)))
    }
}
