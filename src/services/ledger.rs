//! Expense service
//!
//! Business logic for the ledger: recording expenses, moving them to the
//! trash and restoring them. Every move between the ledger and the trash runs
//! inside one SQL transaction.

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use rusqlite::Connection;

use crate::audit::AuditEntry;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_timestamp, Expense, ExpenseId, Money, MonthKey, NewExpense, TrashEntry};
use crate::storage::{ExpenseRepository, Storage, TrashRepository};

/// Service for ledger mutations and listings
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense from raw user input
    ///
    /// `amount` is a decimal with at most two fractional digits. `timestamp`
    /// is `YYYY-MM-DD HH:MM` or `YYYY-MM-DD` (noon); `None` means now.
    /// Nothing is written when either input is malformed.
    pub fn add(
        &self,
        description: &str,
        amount: &str,
        timestamp: Option<&str>,
    ) -> ExpenseResult<Expense> {
        let amount = Money::parse(amount).map_err(|e| {
            ExpenseError::InvalidInput(format!("Invalid amount '{}': {}", amount.trim(), e))
        })?;

        let expense = match timestamp {
            Some(raw) => {
                let created_at = parse_timestamp(raw)
                    .ok_or_else(|| ExpenseError::InvalidDateFormat(raw.to_string()))?;
                NewExpense::new(description, amount, created_at)
            }
            None => NewExpense::now(description, amount),
        };

        self.record(expense)
    }

    /// Store an already validated expense
    pub fn record(&self, expense: NewExpense) -> ExpenseResult<Expense> {
        let created = self.storage.expenses().insert(&expense)?;

        log::info!(
            "Recorded expense {} ({}, {})",
            created.id,
            created.description,
            created.amount
        );
        self.storage.record_audit(&[AuditEntry::create(&created)]);

        Ok(created)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses().get(id)
    }

    /// Move one expense to the trash, returning its snapshot
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let deleted_at = now();

        let expense = self.storage.in_transaction(|conn| {
            let expense = ExpenseRepository::new(conn)
                .get(id)?
                .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

            move_to_trash(conn, &expense, deleted_at)?;
            Ok(expense)
        })?;

        log::info!("Moved expense {} to trash", expense.id);
        self.storage.record_audit(&[AuditEntry::delete(&expense)]);

        Ok(expense)
    }

    /// Move every expense of a calendar day to the trash
    ///
    /// Expenses are pushed oldest first, so the latest one is undone first.
    /// Returns the moved expenses; an empty day moves nothing.
    pub fn delete_by_date(&self, date: NaiveDate) -> ExpenseResult<Vec<Expense>> {
        let deleted_at = now();

        let deleted = self.storage.in_transaction(|conn| {
            let expenses = ExpenseRepository::new(conn).list_by_day(date)?;
            for expense in &expenses {
                move_to_trash(conn, expense, deleted_at)?;
            }
            Ok(expenses)
        })?;

        if !deleted.is_empty() {
            log::info!("Moved {} expense(s) from {} to trash", deleted.len(), date);
            let entries: Vec<AuditEntry> = deleted.iter().map(AuditEntry::delete).collect();
            self.storage.record_audit(&entries);
        }

        Ok(deleted)
    }

    /// Restore the most recently deleted expense with its original id
    pub fn undo_last(&self) -> ExpenseResult<Expense> {
        let restored = self.storage.in_transaction(|conn| {
            let trash = TrashRepository::new(conn);
            let entry = trash.latest()?.ok_or(ExpenseError::EmptyTrash)?;

            let expenses = ExpenseRepository::new(conn);
            if expenses.contains(entry.expense.id)? {
                return Err(ExpenseError::expense_exists(entry.expense.id.to_string()));
            }

            expenses.insert_with_id(&entry.expense)?;
            trash.remove(entry.seq)?;
            Ok(entry.expense)
        })?;

        log::info!("Restored expense {} from trash", restored.id);
        self.storage.record_audit(&[AuditEntry::restore(&restored)]);

        Ok(restored)
    }

    /// Ledger expenses of a month, oldest first
    pub fn list_by_month(&self, month: MonthKey) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses().list_by_month(month)
    }

    /// Every ledger expense, newest first
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses().list_all()
    }

    /// Trash contents, most recently deleted first
    pub fn list_trash(&self) -> ExpenseResult<Vec<TrashEntry>> {
        self.storage.trash().list()
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Copy an expense into the trash and drop it from the ledger
fn move_to_trash(conn: &Connection, expense: &Expense, deleted_at: NaiveDateTime) -> ExpenseResult<()> {
    let trash = TrashRepository::new(conn);
    if trash.contains(expense.id)? {
        return Err(ExpenseError::trash_entry_exists(expense.id.to_string()));
    }

    trash.push(expense, deleted_at)?;
    ExpenseRepository::new(conn).remove(expense.id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open_at(
            temp_dir.path().join("expenses.db"),
            temp_dir.path().join("audit.log"),
        )
        .unwrap();
        (temp_dir, storage)
    }

    fn april() -> MonthKey {
        MonthKey::new(2025, 4).unwrap()
    }

    fn ledger_and_trash_counts(storage: &Storage) -> (usize, usize) {
        (
            storage.expenses().count().unwrap(),
            storage.trash().count().unwrap(),
        )
    }

    #[test]
    fn test_add_then_list() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let created = service.add("coffee", "3.50", Some("2025-04-01 09:00")).unwrap();

        let listed = service.list_by_month(april()).unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(listed[0].description, "coffee");
        assert_eq!(listed[0].amount, Money::from_cents(350));
        assert_eq!(listed[0].created_at.to_string(), "2025-04-01 09:00:00");
    }

    #[test]
    fn test_add_date_only_defaults_to_noon() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let created = service.add("groceries", "45", Some("2025-04-10")).unwrap();
        assert_eq!(created.created_at.to_string(), "2025-04-10 12:00:00");
    }

    #[test]
    fn test_add_without_date_uses_now() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let before = now();
        let created = service.add("snack", "1.25", None).unwrap();
        let after = now();

        assert!(created.created_at >= before && created.created_at <= after);
    }

    #[test]
    fn test_add_invalid_date_inserts_nothing() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service.add("coffee", "3.50", Some("not-a-date")).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidDateFormat(_)));
        assert!(err.is_invalid_input());
        assert_eq!(storage.expenses().count().unwrap(), 0);
    }

    #[test]
    fn test_add_rejects_loose_date_forms() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        for raw in ["2025-4-1", "+12025-04-01", "2025-04-0109:00"] {
            let err = service.add("coffee", "3.50", Some(raw)).unwrap_err();
            assert!(matches!(err, ExpenseError::InvalidDateFormat(_)), "{}", raw);
        }
        assert_eq!(storage.expenses().count().unwrap(), 0);
    }

    #[test]
    fn test_add_keeps_description_verbatim() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let created = service
            .add("  coffee  ", "3.50", Some("2025-04-01 09:00"))
            .unwrap();
        assert_eq!(created.description, "  coffee  ");

        let listed = service.list_by_month(april()).unwrap();
        assert_eq!(listed[0].description, "  coffee  ");
    }

    #[test]
    fn test_add_invalid_amount_inserts_nothing() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        for amount in ["abc", "1.234", ""] {
            let err = service.add("coffee", amount, None).unwrap_err();
            assert!(matches!(err, ExpenseError::InvalidInput(_)), "{}", amount);
        }
        assert_eq!(storage.expenses().count().unwrap(), 0);
    }

    #[test]
    fn test_delete_then_undo_restores_identical_record() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let created = service.add("coffee", "3.50", Some("2025-04-01 09:00")).unwrap();

        let deleted = service.delete(created.id).unwrap();
        assert_eq!(deleted, created);
        assert!(service.list_by_month(april()).unwrap().is_empty());
        assert_eq!(ledger_and_trash_counts(&storage), (0, 1));

        let restored = service.undo_last().unwrap();
        assert_eq!(restored, created);
        assert_eq!(service.list_by_month(april()).unwrap(), vec![created]);
        assert_eq!(ledger_and_trash_counts(&storage), (1, 0));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add("coffee", "3.50", None).unwrap();

        let err = service.delete(ExpenseId::new(999)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ledger_and_trash_counts(&storage), (1, 0));
    }

    #[test]
    fn test_undo_on_empty_trash() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add("coffee", "3.50", None).unwrap();

        let err = service.undo_last().unwrap_err();
        assert!(matches!(err, ExpenseError::EmptyTrash));
        assert_eq!(ledger_and_trash_counts(&storage), (1, 0));
    }

    #[test]
    fn test_undo_walks_back_in_reverse_deletion_order() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let a = service.add("a", "1", Some("2025-04-01 09:00")).unwrap();
        let b = service.add("b", "2", Some("2025-04-02 09:00")).unwrap();

        service.delete(a.id).unwrap();
        service.delete(b.id).unwrap();

        assert_eq!(service.undo_last().unwrap().id, b.id);
        assert_eq!(service.undo_last().unwrap().id, a.id);
        assert!(matches!(
            service.undo_last().unwrap_err(),
            ExpenseError::EmptyTrash
        ));
    }

    #[test]
    fn test_delete_by_date() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let lunch = service.add("lunch", "12.00", Some("2025-04-01 13:00")).unwrap();
        let coffee = service.add("coffee", "3.50", Some("2025-04-01 09:00")).unwrap();
        let taxi = service.add("taxi", "20.00", Some("2025-04-02 08:00")).unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let deleted = service.delete_by_date(day).unwrap();
        assert_eq!(deleted.len(), 2);

        assert_eq!(service.list_by_month(april()).unwrap(), vec![taxi]);

        // Latest-created expense of the day comes back first
        assert_eq!(service.undo_last().unwrap(), lunch);
        assert_eq!(service.undo_last().unwrap(), coffee);
    }

    #[test]
    fn test_delete_by_empty_date() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add("coffee", "3.50", Some("2025-04-01 09:00")).unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        assert!(service.delete_by_date(day).unwrap().is_empty());
        assert_eq!(ledger_and_trash_counts(&storage), (1, 0));
    }

    #[test]
    fn test_restore_onto_colliding_id() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let created = service.add("coffee", "3.50", Some("2025-04-01 09:00")).unwrap();
        service.delete(created.id).unwrap();

        // Something else took the id in the meantime
        let impostor = Expense {
            description: "impostor".into(),
            ..created.clone()
        };
        storage.expenses().insert_with_id(&impostor).unwrap();

        let err = service.undo_last().unwrap_err();
        assert!(matches!(err, ExpenseError::Duplicate { .. }));

        assert_eq!(ledger_and_trash_counts(&storage), (1, 1));
        assert_eq!(service.get(created.id).unwrap().unwrap(), impostor);
        assert_eq!(storage.trash().latest().unwrap().unwrap().expense, created);
    }

    #[test]
    fn test_delete_onto_colliding_trash_entry_rolls_back() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let first = service.add("coffee", "3.50", Some("2025-04-01 09:00")).unwrap();
        let second = service.add("tea", "2.00", Some("2025-04-01 10:00")).unwrap();
        service.delete(second.id).unwrap();
        storage.expenses().insert_with_id(&second).unwrap();

        // The batch fails on the second row; the first must not stay trashed
        let day = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let err = service.delete_by_date(day).unwrap_err();
        assert!(matches!(err, ExpenseError::Duplicate { .. }));

        assert!(service.get(first.id).unwrap().is_some());
        assert_eq!(ledger_and_trash_counts(&storage), (2, 1));
    }

    #[test]
    fn test_mutations_are_audited() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let created = service.add("coffee", "3.50", None).unwrap();
        service.delete(created.id).unwrap();
        service.undo_last().unwrap();

        let operations: Vec<Operation> = storage
            .audit()
            .read_all()
            .unwrap()
            .iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(
            operations,
            vec![Operation::Create, Operation::Delete, Operation::Restore]
        );
    }

    #[test]
    fn test_list_trash() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let a = service.add("a", "1", None).unwrap();
        let b = service.add("b", "2", None).unwrap();
        service.delete(a.id).unwrap();
        service.delete(b.id).unwrap();

        let trash = service.list_trash().unwrap();
        assert_eq!(trash.len(), 2);
        assert_eq!(trash[0].expense, b);
    }
}
