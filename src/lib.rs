//! Kasku is a self-hosted web app for tracking the income and expenses of a
//! multi-activity micro-enterprise: transactions are recorded against a fixed
//! set of business-unit categories, summarized on a dashboard, exportable as
//! CSV or a print view, and optionally narrated by the Google Gemini API.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod ai;
mod alert;
mod analysis;
mod category;
mod dashboard;
mod endpoints;
mod export;
mod html;
mod navigation;
mod not_found;
mod routing;
mod state;
mod store;
#[cfg(test)]
mod test_utils;
mod transaction;
mod transactions_page;

pub use ai::{AnalysisService, GeminiClient};
pub use routing::build_router;
pub use state::AppState;
pub use store::{JsonTransactionStore, TransactionStore};

use crate::{alert::Alert, transaction::TransactionType};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was created with a zero, negative or non-finite amount.
    #[error("transaction amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// A transaction was created with an empty description.
    #[error("transaction description cannot be empty")]
    EmptyDescription,

    /// A transaction was created with a category that is not in the allowed
    /// list for its type.
    #[error("\"{category}\" is not a valid {transaction_type} category")]
    InvalidCategory {
        /// The rejected category name.
        category: String,
        /// The type the category was checked against.
        transaction_type: TransactionType,
    },

    /// Could not acquire the transaction store lock.
    #[error("could not acquire the transaction store lock")]
    StoreLock,

    /// The store file could not be read or written.
    #[error("could not access the transaction store file: {0}")]
    StoreIo(String),

    /// The store file could not be parsed, or the transaction list could not
    /// be serialized.
    #[error("could not (de)serialize the transaction store: {0}")]
    StoreSerialization(String),

    /// The CSV export could not be produced.
    #[error("could not write the CSV export: {0}")]
    CsvExport(String),

    /// The AI request failed or its response could not be decoded.
    ///
    /// The error string should only be logged on the server; clients get a
    /// fixed fallback message instead.
    #[error("the AI request failed: {0}")]
    AiRequest(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => not_found::get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                routing::render_internal_server_error()
            }
        }
    }
}

impl Error {
    /// Render the error as an HTMX alert fragment with a localized message.
    fn into_alert_response(self) -> Response {
        match self {
            Error::NonPositiveAmount(_) => Alert::ErrorSimple {
                message: "Jumlah harus berupa angka lebih besar dari nol".to_owned(),
            }
            .into_response(),
            Error::EmptyDescription => Alert::ErrorSimple {
                message: "Deskripsi tidak boleh kosong".to_owned(),
            }
            .into_response(),
            Error::InvalidCategory {
                category,
                transaction_type,
            } => Alert::Error {
                message: "Kategori tidak valid".to_owned(),
                details: format!(
                    "Kategori \"{category}\" tidak tersedia untuk {}",
                    match transaction_type {
                        TransactionType::Income => "pemasukan",
                        TransactionType::Expense => "pengeluaran",
                    }
                ),
            }
            .into_response(),
            Error::NotFound => Alert::Error {
                message: "Transaksi tidak ditemukan".to_owned(),
                details: "Coba muat ulang halaman; transaksi mungkin sudah dihapus.".to_owned(),
            }
            .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::Error {
                    message: "Terjadi kesalahan".to_owned(),
                    details: "Terjadi kesalahan tak terduga, periksa log server untuk detailnya."
                        .to_owned(),
                }
                .into_response()
            }
        }
    }
}
