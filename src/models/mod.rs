//! Core data models for the expense ledger
//!
//! This module contains the data structures of the ledger domain: expenses,
//! trash entries, money amounts and month keys.

pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use expense::{parse_date, parse_timestamp, Expense, NewExpense, TrashEntry};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
