//! Transaction data aggregation for the dashboard.
//!
//! Provides pure functions to total income and expense, group amounts by
//! category, compute per-business-unit performance, and bucket the recent
//! activity by date for the trend chart. All functions are total over a
//! possibly-empty list and have no side effects.

use std::collections::HashMap;

use time::Date;

use crate::{
    category::BUSINESS_UNITS,
    transaction::{Transaction, TransactionType},
};

/// How many of the most recent per-date buckets the trend keeps.
const TREND_BUCKET_LIMIT: usize = 7;

/// Aggregate income, expense and their balance over a transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinancialSummary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
}

/// Income, expense and profit for one business unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPerformance {
    /// The business unit (category) name.
    pub unit: &'static str,
    /// Income recorded under the unit's category name.
    pub income: f64,
    /// Expenses recorded under the unit's category name.
    pub expense: f64,
    /// `income - expense`.
    pub profit: f64,
    /// Whether the unit has any recorded income or expense. Units without
    /// data stay in the result set so the ordering is stable; views use this
    /// flag to suppress them.
    pub has_data: bool,
}

/// Income and expense totals for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    /// The date the transactions happened on.
    pub date: Date,
    /// Total income on that date.
    pub income: f64,
    /// Total expense on that date.
    pub expense: f64,
}

/// Totals income and expense over `transactions`.
///
/// An empty list yields the all-zero summary.
pub fn financial_summary(transactions: &[Transaction]) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => summary.total_income += transaction.amount,
            TransactionType::Expense => summary.total_expense += transaction.amount,
        }
    }

    summary.balance = summary.total_income - summary.total_expense;
    summary
}

/// Sums amounts per category, counting only transactions of the given type.
///
/// Categories with no matching transactions are omitted rather than listed
/// with zero.
pub fn category_totals(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> HashMap<String, f64> {
    let mut totals = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
    {
        *totals.entry(transaction.category.clone()).or_insert(0.0) += transaction.amount;
    }

    totals
}

/// Computes income, expense and profit for each business unit.
///
/// A unit's figures cover every transaction whose category equals the unit
/// name, across both transaction types; income and expense can legitimately
/// share one category name. The result always contains every unit in the
/// fixed display order, with [UnitPerformance::has_data] marking units that
/// have nothing to show.
pub fn unit_performance(transactions: &[Transaction]) -> Vec<UnitPerformance> {
    BUSINESS_UNITS
        .iter()
        .map(|&unit| {
            let mut income = 0.0;
            let mut expense = 0.0;

            for transaction in transactions
                .iter()
                .filter(|transaction| transaction.category == unit)
            {
                match transaction.transaction_type {
                    TransactionType::Income => income += transaction.amount,
                    TransactionType::Expense => expense += transaction.amount,
                }
            }

            UnitPerformance {
                unit,
                income,
                expense,
                profit: income - expense,
                has_data: income > 0.0 || expense > 0.0,
            }
        })
        .collect()
}

/// Groups transactions by exact date and returns the most recent buckets.
///
/// Buckets are sorted ascending by date and truncated to the last
/// [TREND_BUCKET_LIMIT] distinct dates; fewer distinct dates yield fewer
/// buckets.
pub fn daily_trend(transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut totals: HashMap<Date, (f64, f64)> = HashMap::new();

    for transaction in transactions {
        let entry = totals.entry(transaction.date).or_insert((0.0, 0.0));
        match transaction.transaction_type {
            TransactionType::Income => entry.0 += transaction.amount,
            TransactionType::Expense => entry.1 += transaction.amount,
        }
    }

    let mut buckets: Vec<DailyTotal> = totals
        .into_iter()
        .map(|(date, (income, expense))| DailyTotal {
            date,
            income,
            expense,
        })
        .collect();
    buckets.sort_by_key(|bucket| bucket.date);

    if buckets.len() > TREND_BUCKET_LIMIT {
        buckets.drain(..buckets.len() - TREND_BUCKET_LIMIT);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        category::BUSINESS_UNITS,
        dashboard::aggregation::{
            FinancialSummary, category_totals, daily_trend, financial_summary, unit_performance,
        },
        transaction::{Transaction, TransactionId, TransactionType},
    };

    fn create_test_transaction(
        amount: f64,
        date: Date,
        transaction_type: TransactionType,
        category: &str,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(format!("{category}-{amount}-{date}")),
            date,
            description: "test".to_owned(),
            amount,
            transaction_type,
            category: category.to_owned(),
        }
    }

    #[test]
    fn summary_balance_is_income_minus_expense() {
        let transactions = vec![
            create_test_transaction(1000.0, date!(2023 - 10 - 01), TransactionType::Income, "Las"),
            create_test_transaction(
                400.0,
                date!(2023 - 10 - 02),
                TransactionType::Expense,
                "Las",
            ),
        ];

        let summary = financial_summary(&transactions);

        assert_eq!(
            summary,
            FinancialSummary {
                total_income: 1000.0,
                total_expense: 400.0,
                balance: 600.0,
            }
        );
    }

    #[test]
    fn summary_of_empty_list_is_all_zero() {
        assert_eq!(financial_summary(&[]), FinancialSummary::default());
    }

    #[test]
    fn category_totals_only_counts_matching_type() {
        let transactions = vec![
            create_test_transaction(1000.0, date!(2023 - 10 - 01), TransactionType::Income, "Las"),
            create_test_transaction(
                500.0,
                date!(2023 - 10 - 02),
                TransactionType::Income,
                "Las",
            ),
            create_test_transaction(
                400.0,
                date!(2023 - 10 - 02),
                TransactionType::Expense,
                "Las",
            ),
            create_test_transaction(
                200.0,
                date!(2023 - 10 - 03),
                TransactionType::Income,
                "Tenun",
            ),
        ];

        let totals = category_totals(&transactions, TransactionType::Income);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Las"], 1500.0);
        assert_eq!(totals["Tenun"], 200.0);
    }

    #[test]
    fn category_totals_omits_categories_without_transactions() {
        let transactions = vec![create_test_transaction(
            400.0,
            date!(2023 - 10 - 02),
            TransactionType::Expense,
            "Operasional",
        )];

        let totals = category_totals(&transactions, TransactionType::Income);

        assert!(totals.is_empty());
    }

    #[test]
    fn unit_performance_sums_across_both_types() {
        let transactions = vec![
            create_test_transaction(1000.0, date!(2023 - 10 - 01), TransactionType::Income, "Las"),
            create_test_transaction(
                400.0,
                date!(2023 - 10 - 02),
                TransactionType::Expense,
                "Las",
            ),
        ];

        let performance = unit_performance(&transactions);
        let las = performance.iter().find(|unit| unit.unit == "Las").unwrap();

        assert_eq!(las.income, 1000.0);
        assert_eq!(las.expense, 400.0);
        assert_eq!(las.profit, 600.0);
        assert!(las.has_data);
    }

    #[test]
    fn unit_performance_keeps_units_without_data_in_fixed_order() {
        let performance = unit_performance(&[]);

        assert_eq!(performance.len(), BUSINESS_UNITS.len());
        assert!(performance.iter().all(|unit| !unit.has_data));
        let order: Vec<&str> = performance.iter().map(|unit| unit.unit).collect();
        assert_eq!(order, BUSINESS_UNITS);
    }

    #[test]
    fn unit_performance_ignores_non_unit_categories() {
        let transactions = vec![create_test_transaction(
            500.0,
            date!(2023 - 10 - 18),
            TransactionType::Expense,
            "Operasional",
        )];

        let performance = unit_performance(&transactions);

        assert!(performance.iter().all(|unit| !unit.has_data));
    }

    #[test]
    fn daily_trend_groups_by_date_and_sorts_ascending() {
        let transactions = vec![
            create_test_transaction(
                300.0,
                date!(2023 - 10 - 05),
                TransactionType::Income,
                "Pangkas",
            ),
            create_test_transaction(1000.0, date!(2023 - 10 - 01), TransactionType::Income, "Las"),
            create_test_transaction(
                200.0,
                date!(2023 - 10 - 01),
                TransactionType::Expense,
                "Las",
            ),
        ];

        let trend = daily_trend(&transactions);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, date!(2023 - 10 - 01));
        assert_eq!(trend[0].income, 1000.0);
        assert_eq!(trend[0].expense, 200.0);
        assert_eq!(trend[1].date, date!(2023 - 10 - 05));
        assert_eq!(trend[1].income, 300.0);
    }

    #[test]
    fn daily_trend_keeps_only_the_most_recent_seven_dates() {
        let transactions: Vec<Transaction> = (1..=9)
            .map(|day| {
                create_test_transaction(
                    day as f64,
                    Date::from_calendar_date(2023, time::Month::October, day).unwrap(),
                    TransactionType::Income,
                    "Las",
                )
            })
            .collect();

        let trend = daily_trend(&transactions);

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, date!(2023 - 10 - 03));
        assert_eq!(trend[6].date, date!(2023 - 10 - 09));
    }

    #[test]
    fn daily_trend_of_empty_list_is_empty() {
        assert!(daily_trend(&[]).is_empty());
    }
}
