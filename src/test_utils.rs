//! Shared helpers for route handler tests.

use std::sync::{Arc, Mutex};

use axum_test::TestServer;

use crate::{
    Error,
    ai::AnalysisService,
    build_router,
    state::AppState,
    store::JsonTransactionStore,
    transaction::Transaction,
};

/// An [AnalysisService] that always answers with an empty narrative, for
/// tests that do not exercise the analysis endpoint.
pub struct NullAnalysisService;

impl AnalysisService for NullAnalysisService {
    fn summarize(
        &self,
        _: &[Transaction],
    ) -> impl Future<Output = Result<String, Error>> + Send {
        async { Ok(String::new()) }
    }
}

/// Builds a [TestServer] over a fresh store holding the seed dataset.
///
/// Returns the temp directory (dropping it deletes the store file) and a
/// handle to the store so tests can assert on the persisted state.
pub fn test_server_with_seed_data() -> (
    tempfile::TempDir,
    Arc<Mutex<JsonTransactionStore>>,
    TestServer,
) {
    let directory = tempfile::tempdir().expect("could not create temp directory");
    let store = JsonTransactionStore::open(directory.path().join("transactions.json"))
        .expect("could not open store");

    let store = Arc::new(Mutex::new(store));
    let state = AppState {
        transaction_store: store.clone(),
        analysis_service: Arc::new(NullAnalysisService),
    };

    let server = TestServer::new(build_router(state));

    (directory, store, server)
}
