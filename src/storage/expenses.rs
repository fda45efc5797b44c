//! Expense repository over the `expenses` table

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseId, Money, MonthKey, NewExpense};
use crate::models::expense::{INPUT_DATE_FORMAT, TIMESTAMP_FORMAT};

const SELECT_COLUMNS: &str = "SELECT id, description, amount_cents, created_at FROM expenses";

/// Repository for ledger rows
///
/// Borrows a connection, so the same repository works on a plain connection
/// or inside a transaction.
pub struct ExpenseRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ExpenseRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new expense and return it with its assigned id
    pub fn insert(&self, expense: &NewExpense) -> ExpenseResult<Expense> {
        self.conn.execute(
            "INSERT INTO expenses (description, amount_cents, created_at) VALUES (?1, ?2, ?3)",
            params![
                expense.description,
                expense.amount.cents(),
                format_timestamp(&expense.created_at)
            ],
        )?;

        let id = ExpenseId::new(self.conn.last_insert_rowid());
        Ok(expense.clone().with_id(id))
    }

    /// Insert an expense keeping its existing id (used when restoring)
    pub fn insert_with_id(&self, expense: &Expense) -> ExpenseResult<()> {
        self.conn.execute(
            "INSERT INTO expenses (id, description, amount_cents, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                expense.id.get(),
                expense.description,
                expense.amount.cents(),
                format_timestamp(&expense.created_at)
            ],
        )?;
        Ok(())
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let expense = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.get()],
                map_expense,
            )
            .optional()?;
        Ok(expense)
    }

    /// Check whether the ledger holds the given id
    pub fn contains(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM expenses WHERE id = ?1",
                params![id.get()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Remove a row, returning whether it existed
    pub fn remove(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.get()])?;
        Ok(removed > 0)
    }

    /// Expenses with `start <= created_at < end`, oldest first
    pub fn list_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ExpenseResult<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE created_at >= ?1 AND created_at < ?2 ORDER BY created_at ASC, id ASC",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(
            params![format_timestamp(&start), format_timestamp(&end)],
            map_expense,
        )?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Expenses in a month, oldest first
    pub fn list_by_month(&self, month: MonthKey) -> ExpenseResult<Vec<Expense>> {
        self.list_between(month.start(), month.end_exclusive())
    }

    /// Expenses on a calendar day, oldest first
    pub fn list_by_day(&self, date: NaiveDate) -> ExpenseResult<Vec<Expense>> {
        let (start, end) = day_bounds(date);
        self.list_between(start, end)
    }

    /// Every expense, newest first
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], map_expense)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Per-day sums for a month, ascending by day
    pub fn daily_totals(&self, month: MonthKey) -> ExpenseResult<Vec<(NaiveDate, Money)>> {
        let mut stmt = self.conn.prepare(
            "SELECT substr(created_at, 1, 10) AS day, SUM(amount_cents)
             FROM expenses
             WHERE created_at >= ?1 AND created_at < ?2
             GROUP BY day
             ORDER BY day ASC",
        )?;

        let rows = stmt.query_map(
            params![
                format_timestamp(&month.start()),
                format_timestamp(&month.end_exclusive())
            ],
            |row| {
                let day: String = row.get(0)?;
                let cents: i64 = row.get(1)?;
                let date = NaiveDate::parse_from_str(&day, INPUT_DATE_FORMAT)
                    .map_err(|e| conversion_error(0, e))?;
                Ok((date, Money::from_cents(cents)))
            },
        )?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Per-month sums over the whole ledger, newest month first
    pub fn monthly_totals(&self) -> ExpenseResult<Vec<(MonthKey, Money)>> {
        let mut stmt = self.conn.prepare(
            "SELECT substr(created_at, 1, 7) AS month, SUM(amount_cents)
             FROM expenses
             GROUP BY month
             ORDER BY month DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            let month: String = row.get(0)?;
            let cents: i64 = row.get(1)?;
            let key = MonthKey::parse(&month).map_err(|e| conversion_error(0, e))?;
            Ok((key, Money::from_cents(cents)))
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Sum of amounts with `start <= created_at < end`
    pub fn total_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> ExpenseResult<Money> {
        let cents: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM expenses WHERE created_at >= ?1 AND created_at < ?2",
            params![format_timestamp(&start), format_timestamp(&end)],
            |row| row.get(0),
        )?;
        Ok(Money::from_cents(cents))
    }

    /// Sum of a calendar day
    pub fn day_total(&self, date: NaiveDate) -> ExpenseResult<Money> {
        let (start, end) = day_bounds(date);
        self.total_between(start, end)
    }

    /// Count ledger rows
    pub fn count(&self) -> ExpenseResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Format a timestamp the way it is stored
pub(crate) fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp column
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(|e| conversion_error(idx, e))
}

pub(crate) fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Map `id, description, amount_cents, created_at` starting at column 0
pub(crate) fn map_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: ExpenseId::new(row.get(0)?),
        description: row.get(1)?,
        amount: Money::from_cents(row.get(2)?),
        created_at: timestamp_column(row, 3)?,
    })
}

fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(chrono::NaiveTime::default());
    let end = start + chrono::Duration::days(1);
    (start, end)
}
