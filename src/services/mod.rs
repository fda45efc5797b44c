//! Service layer for the expense ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling input validation, transactional moves and audit logging.

pub mod aggregate;
pub mod ledger;

pub use aggregate::{AggregateService, DailyTotal, MonthTotal, MonthlyTotals};
pub use ledger::ExpenseService;
