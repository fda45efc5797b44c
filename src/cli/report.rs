//! Report CLI commands
//!
//! Terminal views of daily, monthly and single-day totals.

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_daily_totals, format_day_total, format_monthly_summary};
use crate::error::ExpenseResult;
use crate::services::AggregateService;
use crate::storage::Storage;

use super::{parse_date, parse_month};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Daily totals of a month (YYYY-MM), or a per-month summary of all months
    Report {
        /// Month to report on
        month: Option<String>,
    },
    /// Total spent on one day (YYYY-MM-DD), default today
    Total {
        /// Day to sum
        date: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let service = AggregateService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Report { month: Some(month) } => {
            let totals = service.daily_totals(parse_month(&month)?)?;
            print!("{}", format_daily_totals(&totals, currency));
        }
        ReportCommands::Report { month: None } => {
            let summary = service.monthly_summary()?;
            print!("{}", format_monthly_summary(&summary, currency));
        }
        ReportCommands::Total { date } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };
            let total = service.day_total(date)?;
            print!("{}", format_day_total(date, total, currency));
        }
    }

    Ok(())
}
