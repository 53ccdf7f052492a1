//! Implements the structs that hold the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;

use crate::{ai::AnalysisService, store::TransactionStore};

/// The state of the REST server.
#[derive(Debug)]
pub struct AppState<T, A>
where
    T: TransactionStore + Send + Sync,
    A: AnalysisService + Send + Sync,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: Arc<Mutex<T>>,
    /// The service that produces the AI narrative.
    pub analysis_service: Arc<A>,
}

impl<T, A> AppState<T, A>
where
    T: TransactionStore + Send + Sync,
    A: AnalysisService + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(transaction_store: T, analysis_service: A) -> Self {
        Self {
            transaction_store: Arc::new(Mutex::new(transaction_store)),
            analysis_service: Arc::new(analysis_service),
        }
    }
}

// Derived Clone would put Clone bounds on T and A, neither of which is Clone.
impl<T, A> Clone for AppState<T, A>
where
    T: TransactionStore + Send + Sync,
    A: AnalysisService + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            transaction_store: self.transaction_store.clone(),
            analysis_service: self.analysis_service.clone(),
        }
    }
}

/// The state needed to read or mutate transactions.
#[derive(Debug)]
pub struct TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: Arc<Mutex<T>>,
}

impl<T> Clone for TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            transaction_store: self.transaction_store.clone(),
        }
    }
}

impl<T, A> FromRef<AppState<T, A>> for TransactionState<T>
where
    T: TransactionStore + Send + Sync,
    A: AnalysisService + Send + Sync,
{
    fn from_ref(state: &AppState<T, A>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed for running the AI analysis.
#[derive(Debug)]
pub struct AnalysisState<T, A>
where
    T: TransactionStore + Send + Sync,
    A: AnalysisService + Send + Sync,
{
    /// The store the transactions are read from.
    pub transaction_store: Arc<Mutex<T>>,
    /// The service that produces the AI narrative.
    pub analysis_service: Arc<A>,
}

impl<T, A> Clone for AnalysisState<T, A>
where
    T: TransactionStore + Send + Sync,
    A: AnalysisService + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            transaction_store: self.transaction_store.clone(),
            analysis_service: self.analysis_service.clone(),
        }
    }
}

impl<T, A> FromRef<AppState<T, A>> for AnalysisState<T, A>
where
    T: TransactionStore + Send + Sync,
    A: AnalysisService + Send + Sync,
{
    fn from_ref(state: &AppState<T, A>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            analysis_service: state.analysis_service.clone(),
        }
    }
}
