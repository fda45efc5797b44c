//! Strongly-typed expense id
//!
//! Ids are assigned by the store (SQLite rowid sequence) and never reused, so
//! the wrapper only guards against mixing them up with other integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of an expense, stable across delete and undo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer stored in the database
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ExpenseId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept "#12" as printed by `list`
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<ExpenseId>().unwrap(), ExpenseId::new(12));
        assert_eq!("#7".parse::<ExpenseId>().unwrap(), ExpenseId::new(7));
        assert!("abc".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExpenseId::new(42).to_string(), "42");
    }
}
