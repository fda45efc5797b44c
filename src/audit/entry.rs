//! Audit entry data structures
//!
//! Defines the operations recorded in the audit log and the entry format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was added to the ledger
    Create,
    /// Expense was moved from the ledger to the trash
    Delete,
    /// Expense was moved from the trash back to the ledger
    Restore,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Restore => write!(f, "RESTORE"),
        }
    }
}

/// A single audit log entry
///
/// Records one operation on an expense with the expense snapshot as it was
/// before (delete) or after (create, restore) the operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected expense
    pub expense_id: i64,

    /// Description of the expense at the time of the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON representation of the expense before the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the expense after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(operation: Operation, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            expense_id: expense.id.get(),
            description: Some(expense.description.clone()),
            before: None,
            after: None,
        }
    }

    /// Entry for an expense that was just recorded
    pub fn create(expense: &Expense) -> Self {
        Self {
            after: serde_json::to_value(expense).ok(),
            ..Self::new(Operation::Create, expense)
        }
    }

    /// Entry for an expense that was moved to the trash
    pub fn delete(expense: &Expense) -> Self {
        Self {
            before: serde_json::to_value(expense).ok(),
            ..Self::new(Operation::Delete, expense)
        }
    }

    /// Entry for an expense restored from the trash
    pub fn restore(expense: &Expense) -> Self {
        Self {
            after: serde_json::to_value(expense).ok(),
            ..Self::new(Operation::Restore, expense)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} expense {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense_id
        );

        if let Some(description) = &self.description {
            output.push_str(&format!(" ({})", description));
        }

        output
    }
}
