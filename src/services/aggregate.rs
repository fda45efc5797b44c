//! Aggregation service
//!
//! Per-day and per-month sums computed from the ledger at query time.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::{Money, MonthKey};
use crate::storage::Storage;

/// Sum of all expenses on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Money,
}

/// Day sums of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub month: MonthKey,
    /// Days with at least one expense, ascending
    pub days: Vec<DailyTotal>,
    /// Sum of the day sums
    pub total: Money,
}

impl MonthlyTotals {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Sum of all expenses in one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    pub month: MonthKey,
    pub total: Money,
}

/// Service for ledger aggregates
pub struct AggregateService<'a> {
    storage: &'a Storage,
}

impl<'a> AggregateService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Per-day totals of a month plus the month total
    pub fn daily_totals(&self, month: MonthKey) -> ExpenseResult<MonthlyTotals> {
        let days: Vec<DailyTotal> = self
            .storage
            .expenses()
            .daily_totals(month)?
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect();

        let total = days.iter().map(|d| d.total).sum();

        Ok(MonthlyTotals { month, days, total })
    }

    /// Totals of every month with expenses, newest month first
    pub fn monthly_summary(&self) -> ExpenseResult<Vec<MonthTotal>> {
        Ok(self
            .storage
            .expenses()
            .monthly_totals()?
            .into_iter()
            .map(|(month, total)| MonthTotal { month, total })
            .collect())
    }

    /// Total of a single calendar day
    pub fn day_total(&self, date: NaiveDate) -> ExpenseResult<Money> {
        self.storage.expenses().day_total(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ExpenseService;
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

    fn seed(storage: &Storage) {
        let service = ExpenseService::new(storage);
        service.add("coffee", "3.50", Some("2025-04-01 09:00")).unwrap();
        service.add("lunch", "12.00", Some("2025-04-01 13:00")).unwrap();
        service.add("taxi", "20.00", Some("2025-04-02 08:00")).unwrap();
        service.add("rent", "900", Some("2025-03-01")).unwrap();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_totals() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let totals = AggregateService::new(&storage)
            .daily_totals(MonthKey::new(2025, 4).unwrap())
            .unwrap();

        assert_eq!(
            totals.days,
            vec![
                DailyTotal {
                    date: date(2025, 4, 1),
                    total: Money::from_cents(1550)
                },
                DailyTotal {
                    date: date(2025, 4, 2),
                    total: Money::from_cents(2000)
                },
            ]
        );
        assert_eq!(totals.total, Money::from_cents(3550));
    }

    #[test]
    fn test_daily_totals_match_listing() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);
        let month = MonthKey::new(2025, 4).unwrap();

        let listed = ExpenseService::new(&storage).list_by_month(month).unwrap();
        let totals = AggregateService::new(&storage).daily_totals(month).unwrap();

        for day in &totals.days {
            let expected: Money = listed
                .iter()
                .filter(|e| e.date() == day.date)
                .map(|e| e.amount)
                .sum();
            assert_eq!(day.total, expected);
        }
        assert_eq!(totals.total, listed.iter().map(|e| e.amount).sum());
    }

    #[test]
    fn test_empty_month() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let totals = AggregateService::new(&storage)
            .daily_totals(MonthKey::new(2024, 12).unwrap())
            .unwrap();
        assert!(totals.is_empty());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_monthly_summary() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let summary = AggregateService::new(&storage).monthly_summary().unwrap();
        assert_eq!(
            summary,
            vec![
                MonthTotal {
                    month: MonthKey::new(2025, 4).unwrap(),
                    total: Money::from_cents(3550)
                },
                MonthTotal {
                    month: MonthKey::new(2025, 3).unwrap(),
                    total: Money::from_cents(90000)
                },
            ]
        );
    }

    #[test]
    fn test_day_total() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let service = AggregateService::new(&storage);
        assert_eq!(
            service.day_total(date(2025, 4, 1)).unwrap(),
            Money::from_cents(1550)
        );
        assert_eq!(service.day_total(date(2025, 4, 3)).unwrap(), Money::zero());
    }

    #[test]
    fn test_negative_amounts_are_summed() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add("shoes", "60", Some("2025-05-01")).unwrap();
        service.add("refund", "-15.25", Some("2025-05-01")).unwrap();

        let totals = AggregateService::new(&storage)
            .daily_totals(MonthKey::new(2025, 5).unwrap())
            .unwrap();
        assert_eq!(totals.total, Money::from_cents(4475));
    }

    #[test]
    fn test_largest_amounts_sum_exactly() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add("car", "99999999.99", Some("2025-04-01")).unwrap();
        service.add("boat", "99999999.99", Some("2025-04-02")).unwrap();
        assert!(service.add("yacht", "90000000000000000", None).is_err());

        let totals = AggregateService::new(&storage)
            .daily_totals(MonthKey::new(2025, 4).unwrap())
            .unwrap();
        assert_eq!(totals.total, Money::from_cents(19_999_999_998));
        assert_eq!(
            AggregateService::new(&storage).monthly_summary().unwrap()[0].total,
            totals.total
        );
    }
}
