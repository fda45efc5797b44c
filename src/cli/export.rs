//! CLI commands for data export
//!
//! Writes monthly reports, the monthly summary or the whole ledger to CSV or
//! XLSX files.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::ExpenseResult;
use crate::export::{write_tables, ExportFormat};
use crate::reports;
use crate::services::{AggregateService, ExpenseService};
use crate::storage::Storage;

use super::parse_month;

/// Shape of a single-month export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Every expense with a total row
    #[default]
    Detail,
    /// One row per day with a monthly total
    Totals,
    /// Expenses grouped by day with daily subtotals
    Breakdown,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export one month
    Month {
        /// Month to export (YYYY-MM)
        month: String,

        /// Output file path
        output: PathBuf,

        /// Report shape
        #[arg(short, long, value_enum, default_value = "detail")]
        kind: ReportKind,

        /// File format (inferred from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Export per-month totals of the whole ledger
    Summary {
        /// Output file path
        output: PathBuf,

        /// File format (inferred from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Export every expense, one table per month
    All {
        /// Output file path
        output: PathBuf,

        /// File format (inferred from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> ExpenseResult<()> {
    match cmd {
        ExportCommands::Month {
            month,
            output,
            kind,
            format,
        } => {
            let month = parse_month(&month)?;
            let format = ExportFormat::resolve(format, &output, settings.default_export_format);

            let table = match kind {
                ReportKind::Detail => {
                    let expenses = ExpenseService::new(storage).list_by_month(month)?;
                    reports::expense_detail(month, &expenses)
                }
                ReportKind::Totals => {
                    let totals = AggregateService::new(storage).daily_totals(month)?;
                    reports::daily_totals(&totals)
                }
                ReportKind::Breakdown => {
                    let expenses = ExpenseService::new(storage).list_by_month(month)?;
                    reports::daily_breakdown(month, &expenses)
                }
            };

            write_tables(&output, format, &[table])?;
            println!("Exported {} for {} to: {}", kind_label(kind), month, output.display());
        }

        ExportCommands::Summary { output, format } => {
            let format = ExportFormat::resolve(format, &output, settings.default_export_format);
            let summary = AggregateService::new(storage).monthly_summary()?;

            write_tables(&output, format, &[reports::monthly_summary(&summary)])?;
            println!(
                "Exported summary of {} month(s) to: {}",
                summary.len(),
                output.display()
            );
        }

        ExportCommands::All { output, format } => {
            let format = ExportFormat::resolve(format, &output, settings.default_export_format);
            let expenses = ExpenseService::new(storage).list_all()?;
            let tables = reports::detail_by_month(&expenses);

            write_tables(&output, format, &tables)?;
            println!(
                "Exported {} expense(s) across {} month(s) to: {}",
                expenses.len(),
                tables.len(),
                output.display()
            );
        }
    }

    Ok(())
}

fn kind_label(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Detail => "expense detail",
        ReportKind::Totals => "daily totals",
        ReportKind::Breakdown => "daily breakdown",
    }
}
