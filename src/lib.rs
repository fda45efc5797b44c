//! Expense Ledger - command-line personal expense tracking
//!
//! This library provides the core functionality of the `expense` tool. It
//! records dated expenses in a SQLite ledger, keeps deleted expenses in a
//! trash that can be undone, and aggregates the ledger into daily and
//! monthly totals that can be exported as CSV or XLSX.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, month keys)
//! - `storage`: SQLite storage layer (ledger and trash tables)
//! - `services`: Business logic layer (ledger mutations, aggregation)
//! - `audit`: Audit logging system
//! - `reports`: Projection of ledger data into report tables
//! - `export`: CSV and XLSX table writers
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::config::{paths::ExpensePaths, settings::Settings};
//! use expense_ledger::services::ExpenseService;
//! use expense_ledger::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(&paths, &settings)?;
//! ExpenseService::new(&storage).add("coffee", "3.50", None)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
