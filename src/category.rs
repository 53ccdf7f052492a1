//! The static category configuration.
//!
//! Categories are a fixed table, not user data: the deployment tracks a known
//! set of business units (sewing, welding, car wash and so on) plus the
//! catch-all entries. Income and expense deliberately share the unit names so
//! that a unit's income and spending land under the same label, which is what
//! makes per-unit profit reporting possible.

use crate::transaction::TransactionType;

/// The categories that can be assigned to an income transaction.
pub const INCOME_CATEGORIES: [&str; 9] = [
    "Menjahit",
    "Las",
    "Doorsmeer",
    "Pangkas",
    "Pertanian Luar Tembok",
    "Hidroponik",
    "Tenun",
    "Miniatur",
    "Lainnya",
];

/// The categories that can be assigned to an expense transaction.
///
/// Same list as for income, plus "Operasional" for overheads that do not
/// belong to a single business unit.
pub const EXPENSE_CATEGORIES: [&str; 10] = [
    "Menjahit",
    "Las",
    "Doorsmeer",
    "Pangkas",
    "Pertanian Luar Tembok",
    "Hidroponik",
    "Tenun",
    "Miniatur",
    "Operasional",
    "Lainnya",
];

/// The business units reported on individually, in display order.
///
/// Every unit name appears in both category lists; "Operasional" and
/// "Lainnya" are not units and are excluded from per-unit reporting.
pub const BUSINESS_UNITS: [&str; 8] = [
    "Menjahit",
    "Las",
    "Doorsmeer",
    "Pangkas",
    "Pertanian Luar Tembok",
    "Hidroponik",
    "Tenun",
    "Miniatur",
];

/// The categories allowed for transactions of the given type.
pub fn categories_for(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Whether `category` may be assigned to a transaction of the given type.
pub fn is_allowed_category(category: &str, transaction_type: TransactionType) -> bool {
    categories_for(transaction_type).contains(&category)
}

/// The union of the income and expense category lists, deduplicated and
/// sorted, for the transaction filter dropdown.
pub fn all_categories() -> Vec<&'static str> {
    let mut categories: Vec<&str> = INCOME_CATEGORIES
        .iter()
        .chain(EXPENSE_CATEGORIES.iter())
        .copied()
        .collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}
