//! Trash repository: deleted expenses kept as an undo stack
//!
//! Entries are ordered by `seq`, which grows with every push. The entry with
//! the highest `seq` is the top of the stack.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::expenses::{format_timestamp, timestamp_column};
use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseId, Money, TrashEntry};

const SELECT_COLUMNS: &str =
    "SELECT seq, id, description, amount_cents, created_at, deleted_at FROM trash";

pub struct TrashRepository<'a> {
    conn: &'a Connection,
}

impl<'a> TrashRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Push a deleted expense onto the stack
    pub fn push(&self, expense: &Expense, deleted_at: NaiveDateTime) -> ExpenseResult<TrashEntry> {
        self.conn.execute(
            "INSERT INTO trash (id, description, amount_cents, created_at, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.id.get(),
                expense.description,
                expense.amount.cents(),
                format_timestamp(&expense.created_at),
                format_timestamp(&deleted_at)
            ],
        )?;

        Ok(TrashEntry {
            seq: self.conn.last_insert_rowid(),
            expense: expense.clone(),
            deleted_at,
        })
    }

    /// The most recently pushed entry, if any
    pub fn latest(&self) -> ExpenseResult<Option<TrashEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("{} ORDER BY seq DESC LIMIT 1", SELECT_COLUMNS),
                [],
                map_entry,
            )
            .optional()?;
        Ok(entry)
    }

    /// Drop an entry by sequence number
    pub fn remove(&self, seq: i64) -> ExpenseResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM trash WHERE seq = ?1", params![seq])?;
        Ok(removed > 0)
    }

    /// Check whether an expense id is in the trash
    pub fn contains(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM trash WHERE id = ?1",
                params![id.get()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All entries, most recently deleted first
    pub fn list(&self) -> ExpenseResult<Vec<TrashEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY seq DESC", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], map_entry)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM trash", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn map_entry(row: &Row<'_>) -> rusqlite::Result<TrashEntry> {
    Ok(TrashEntry {
        seq: row.get(0)?,
        expense: Expense {
            id: ExpenseId::new(row.get(1)?),
            description: row.get(2)?,
            amount: Money::from_cents(row.get(3)?),
            created_at: timestamp_column(row, 4)?,
        },
        deleted_at: timestamp_column(row, 5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;
    use crate::storage::schema;
    use chrono::NaiveDate;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::apply(&conn).unwrap();
        conn
    }

    fn expense(id: i64, description: &str) -> Expense {
        let at = NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        NewExpense::new(description, Money::from_cents(100), at).with_id(ExpenseId::new(id))
    }

    fn deleted_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 5)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_push_and_latest() {
        let conn = setup();
        let trash = TrashRepository::new(&conn);

        trash.push(&expense(1, "first"), deleted_at()).unwrap();
        trash.push(&expense(2, "second"), deleted_at()).unwrap();

        let top = trash.latest().unwrap().unwrap();
        assert_eq!(top.expense.id, ExpenseId::new(2));
        assert_eq!(top.deleted_at, deleted_at());
        assert!(trash.contains(ExpenseId::new(1)).unwrap());
    }

    #[test]
    fn test_empty_trash() {
        let conn = setup();
        let trash = TrashRepository::new(&conn);
        assert!(trash.latest().unwrap().is_none());
        assert!(trash.list().unwrap().is_empty());
    }

    #[test]
    fn test_remove_pops_in_reverse_order() {
        let conn = setup();
        let trash = TrashRepository::new(&conn);

        trash.push(&expense(1, "first"), deleted_at()).unwrap();
        let second = trash.push(&expense(2, "second"), deleted_at()).unwrap();

        assert!(trash.remove(second.seq).unwrap());
        assert_eq!(trash.latest().unwrap().unwrap().expense.id, ExpenseId::new(1));
        assert_eq!(trash.count().unwrap(), 1);
    }

    #[test]
    fn test_unique_id_constraint() {
        let conn = setup();
        let trash = TrashRepository::new(&conn);

        trash.push(&expense(1, "first"), deleted_at()).unwrap();
        assert!(trash.push(&expense(1, "again"), deleted_at()).is_err());
        assert_eq!(trash.count().unwrap(), 1);
    }

    #[test]
    fn test_list_most_recent_first() {
        let conn = setup();
        let trash = TrashRepository::new(&conn);

        for id in 1..=3 {
            trash.push(&expense(id, "item"), deleted_at()).unwrap();
        }

        let ids: Vec<i64> = trash.list().unwrap().iter().map(|e| e.expense.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
