//! Transaction persistence.
//!
//! The whole transaction list is persisted as a single JSON array in one
//! file, rewritten on every mutation. That is deliberately simple: this is a
//! single-user, single-device deployment and the list is small. The store is
//! injected behind the [TransactionStore] trait so handlers and tests never
//! depend on the file system directly.

use std::{
    fs,
    path::{Path, PathBuf},
};

use time::{OffsetDateTime, macros::date};

use crate::{
    Error,
    transaction::{Transaction, TransactionBuilder, TransactionId, TransactionType},
};

/// The interface for storing and retrieving [Transaction]s.
pub trait TransactionStore {
    /// All transactions in insertion order.
    fn transactions(&self) -> &[Transaction];

    /// Validate `builder`, assign a fresh id, append the transaction and
    /// persist the full list.
    ///
    /// # Errors
    /// Returns an error if validation fails or the list cannot be persisted.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Remove the transaction with the given id and persist the full list.
    ///
    /// Returns whether a transaction was removed; deleting an id that does
    /// not exist is a no-op on the data.
    ///
    /// # Errors
    /// Returns an error if the list cannot be persisted.
    fn delete(&mut self, id: &TransactionId) -> Result<bool, Error>;
}

/// A [TransactionStore] backed by a single JSON file.
#[derive(Debug)]
pub struct JsonTransactionStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl JsonTransactionStore {
    /// Open the store at `path`.
    ///
    /// If the file does not exist the store starts from the seed dataset and
    /// writes it out immediately, so a fresh deployment has something to
    /// show.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the seed dataset cannot be written.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_owned();

        if !path.exists() {
            let mut store = Self {
                path,
                transactions: seed_transactions(),
            };
            store.save()?;
            tracing::info!(
                "created new transaction store at {} with seed data",
                store.path.display()
            );
            return Ok(store);
        }

        let text = fs::read_to_string(&path)
            .map_err(|error| Error::StoreIo(format!("{}: {error}", path.display())))?;
        let transactions: Vec<Transaction> = serde_json::from_str(&text)
            .map_err(|error| Error::StoreSerialization(error.to_string()))?;

        Ok(Self { path, transactions })
    }

    /// Rewrite the backing file with the current transaction list.
    fn save(&mut self) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(&self.transactions)
            .map_err(|error| Error::StoreSerialization(error.to_string()))?;

        fs::write(&self.path, text)
            .map_err(|error| Error::StoreIo(format!("{}: {error}", self.path.display())))
    }

    /// Assign a fresh id from the current Unix-epoch milliseconds, bumped
    /// until it does not collide with an existing id.
    fn next_id(&self) -> TransactionId {
        let now = OffsetDateTime::now_utc();
        let mut candidate =
            now.unix_timestamp() as i128 * 1_000 + i128::from(now.millisecond());

        while self
            .transactions
            .iter()
            .any(|transaction| transaction.id.as_str() == candidate.to_string())
        {
            candidate += 1;
        }

        TransactionId::new(candidate.to_string())
    }
}

impl TransactionStore for JsonTransactionStore {
    fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = builder.finalize(self.next_id())?;
        self.transactions.push(transaction.clone());
        self.save()?;

        Ok(transaction)
    }

    fn delete(&mut self, id: &TransactionId) -> Result<bool, Error> {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != *id);

        if self.transactions.len() == count_before {
            return Ok(false);
        }

        self.save()?;
        Ok(true)
    }
}

/// The seed dataset a fresh store starts from.
pub fn seed_transactions() -> Vec<Transaction> {
    [
        (
            "1",
            date!(2023 - 10 - 01),
            "Jasa Las Pagar Besi",
            3_500_000.0,
            TransactionType::Income,
            "Las",
        ),
        (
            "2",
            date!(2023 - 10 - 02),
            "Belanja Sabun & Wax Doorsmeer",
            450_000.0,
            TransactionType::Expense,
            "Doorsmeer",
        ),
        (
            "3",
            date!(2023 - 10 - 05),
            "Pendapatan Harian Pangkas",
            350_000.0,
            TransactionType::Income,
            "Pangkas",
        ),
        (
            "4",
            date!(2023 - 10 - 10),
            "Service Mesin Jahit",
            150_000.0,
            TransactionType::Expense,
            "Menjahit",
        ),
        (
            "5",
            date!(2023 - 10 - 15),
            "Borongan Jahit Seragam",
            2_500_000.0,
            TransactionType::Income,
            "Menjahit",
        ),
        (
            "6",
            date!(2023 - 10 - 18),
            "Bayar Listrik Workshop",
            500_000.0,
            TransactionType::Expense,
            "Operasional",
        ),
    ]
    .into_iter()
    .map(
        |(id, date, description, amount, transaction_type, category)| Transaction {
            id: TransactionId::new(id),
            date,
            description: description.to_owned(),
            amount,
            transaction_type,
            category: category.to_owned(),
        },
    )
    .collect()
}
