//! Expense model
//!
//! An expense is a single dated outlay with a free-text description. Deleted
//! expenses are kept in the trash as `TrashEntry` values until undone.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;
use super::month::MonthKey;

/// Storage format of `created_at` and `deleted_at` columns
///
/// Lexicographic order of this format matches chronological order, which the
/// range queries rely on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input form with a time of day
pub const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accepted input form for a bare date
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Time of day used when only a date is given (noon)
pub fn default_time_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Amount spent
    pub amount: Money,

    /// When the expense happened (local time, second precision)
    pub created_at: NaiveDateTime,
}

impl Expense {
    /// Calendar day of the expense
    pub fn date(&self) -> NaiveDate {
        self.created_at.date()
    }

    /// Month bucket of the expense
    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date())
    }
}

/// An expense that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub created_at: NaiveDateTime,
}

impl NewExpense {
    /// Create an expense stamped with the given time
    pub fn new(description: impl Into<String>, amount: Money, created_at: NaiveDateTime) -> Self {
        Self {
            description: description.into(),
            amount,
            // Stored with second precision, so truncate up front to keep the
            // returned value identical to what a later read yields
            created_at: created_at.trunc_subsecs(0),
        }
    }

    /// Create an expense stamped with the current local time
    pub fn now(description: impl Into<String>, amount: Money) -> Self {
        Self::new(description, amount, chrono::Local::now().naive_local())
    }

    /// Attach the id assigned by the store
    pub fn with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

/// A soft-deleted expense waiting in the trash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashEntry {
    /// Insertion sequence; the highest value is the next one undone
    pub seq: i64,

    /// The expense exactly as it was in the ledger
    pub expense: Expense,

    /// When it was moved to the trash
    pub deleted_at: NaiveDateTime,
}

/// Literal shapes of the accepted inputs; `d` stands for one ASCII digit
const DATE_SHAPE: &str = "dddd-dd-dd";
const DATETIME_SHAPE: &str = "dddd-dd-dd dd:dd";

fn has_shape(input: &str, shape: &str) -> bool {
    input.len() == shape.len()
        && input.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            _ => c == s,
        })
}

/// Parse a user-supplied `YYYY-MM-DD` date
///
/// Only the exact zero-padded form with a four-digit year is accepted.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if !has_shape(input, DATE_SHAPE) {
        return None;
    }
    NaiveDate::parse_from_str(input, INPUT_DATE_FORMAT).ok()
}

/// Parse a user-supplied expense timestamp
///
/// Accepts `YYYY-MM-DD HH:MM`, or `YYYY-MM-DD` which is placed at noon.
/// Returns `None` for any other form.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if has_shape(input, DATETIME_SHAPE) {
        return NaiveDateTime::parse_from_str(input, INPUT_DATETIME_FORMAT).ok();
    }

    parse_date(input).map(|date| date.and_time(default_time_of_day()))
}
