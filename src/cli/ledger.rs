//! Ledger CLI commands
//!
//! Recording, deleting, restoring and listing expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_line, format_expense_list, format_trash_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::{parse_date, parse_id, parse_month};

/// Ledger subcommands
#[derive(Subcommand, Debug)]
pub enum LedgerCommands {
    /// Record an expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount, e.g. "12.50" (negative for refunds)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// When it happened: "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" (noon); defaults to now
        date: Option<String>,
    },
    /// Move an expense, or every expense of a day, to the trash
    Delete {
        /// Expense ID
        #[arg(required_unless_present = "date", conflicts_with = "date")]
        id: Option<String>,
        /// Delete all expenses on this day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Restore the most recently deleted expense
    Undo,
    /// List expenses of a month (YYYY-MM), or all expenses newest first
    List {
        /// Month to list
        month: Option<String>,
    },
    /// Show deleted expenses waiting in the trash
    Trash,
    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a ledger command
pub fn handle_ledger_command(
    storage: &Storage,
    settings: &Settings,
    cmd: LedgerCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let datetime_format = settings.datetime_format.as_str();
    let currency = settings.currency_symbol.as_str();

    match cmd {
        LedgerCommands::Add {
            description,
            amount,
            date,
        } => {
            let expense = service.add(&description, &amount, date.as_deref())?;
            println!(
                "Added expense {}",
                format_expense_line(&expense, datetime_format, currency)
            );
        }

        LedgerCommands::Delete { id, date } => match (id, date) {
            (Some(id), _) => {
                let expense = service.delete(parse_id(&id)?)?;
                println!(
                    "Deleted expense {}",
                    format_expense_line(&expense, datetime_format, currency)
                );
                println!("Run 'expense undo' to restore it.");
            }
            (None, Some(date)) => {
                let date = parse_date(&date)?;
                let deleted = service.delete_by_date(date)?;
                if deleted.is_empty() {
                    println!("No expenses found on {}.", date);
                } else {
                    println!("Deleted {} expense(s) from {}.", deleted.len(), date);
                }
            }
            (None, None) => {
                return Err(ExpenseError::InvalidInput(
                    "Specify an expense id or --date".to_string(),
                ))
            }
        },

        LedgerCommands::Undo => {
            let expense = service.undo_last()?;
            println!(
                "Restored expense {}",
                format_expense_line(&expense, datetime_format, currency)
            );
        }

        LedgerCommands::List { month } => {
            let expenses = match month {
                Some(month) => {
                    let month = parse_month(&month)?;
                    println!("Expenses for {}", month);
                    service.list_by_month(month)?
                }
                None => service.list_all()?,
            };
            print!("{}", format_expense_list(&expenses, datetime_format, currency));
        }

        LedgerCommands::Trash => {
            let entries = service.list_trash()?;
            print!("{}", format_trash_list(&entries, datetime_format, currency));
        }

        LedgerCommands::History { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No history recorded.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}
