//! The AI analysis page and endpoint.
//!
//! The page shows a single trigger button; the endpoint collects the full
//! transaction list, asks the configured [AnalysisService] for a narrative
//! and returns it as an HTMX fragment. The endpoint never fails the request:
//! a service error is logged and replaced with a fixed fallback message.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    ai::AnalysisService,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, loading_spinner},
    navigation::NavBar,
    state::AnalysisState,
    store::TransactionStore,
};

/// The message shown when the analysis service fails.
const FALLBACK_MESSAGE: &str =
    "Terjadi kesalahan saat menghubungi layanan AI. Silakan coba lagi nanti.";

/// Display the AI analysis page.
pub async fn get_analysis_page() -> Markup {
    let nav_bar = NavBar::new(endpoints::ANALYSIS_VIEW);

    base(
        "Analisis AI",
        &[],
        &html! {
            (nav_bar.into_html())

            div class=(PAGE_CONTAINER_STYLE)
            {
                div class="w-full max-w-screen-md"
                {
                    div class="bg-gradient-to-r from-indigo-600 to-purple-600 rounded-lg p-6 text-white shadow-lg mb-6"
                    {
                        h1 class="text-2xl font-bold mb-2" { "Analisis Keuangan Cerdas" }

                        p class="text-indigo-100 mb-6"
                        {
                            "Gunakan kecerdasan buatan Gemini untuk menganalisis \
                            pola pengeluaran Anda dan dapatkan saran penghematan \
                            yang dipersonalisasi."
                        }

                        button
                            hx-post=(endpoints::ANALYSIS_API)
                            hx-target="#analysis-result"
                            hx-swap="innerHTML"
                            hx-disabled-elt="this"
                            hx-indicator="#indicator"
                            class=(BUTTON_PRIMARY_STYLE)
                        {
                            span id="indicator" class="htmx-indicator"
                            {
                                (loading_spinner())
                            }

                            "Mulai Analisis AI"
                        }
                    }

                    div id="analysis-result" {}
                }
            }
        },
    )
}

/// Renders the narrative fragment returned by the analysis endpoint.
fn analysis_result(narrative: &str) -> Markup {
    html! {
        div class="bg-white dark:bg-gray-800 rounded-lg shadow-sm border \
            border-gray-200 dark:border-gray-700 p-6"
        {
            h2 class="text-xl font-bold mb-4 border-b border-gray-200 dark:border-gray-700 pb-4"
            {
                "Hasil Analisis"
            }

            div class="whitespace-pre-wrap leading-relaxed text-gray-700 dark:text-gray-300"
            {
                (narrative)
            }
        }
    }
}

/// A route handler that runs the AI analysis over all stored transactions.
///
/// Service failures are logged and rendered as the fixed fallback message;
/// the response status is always 200 so HTMX swaps the fragment in.
pub async fn post_analysis<T, A>(State(state): State<AnalysisState<T, A>>) -> Response
where
    T: TransactionStore + Send + Sync,
    A: AnalysisService + Send + Sync,
{
    // Copy the list out so the store lock is not held across the request.
    let transactions = match state.transaction_store.lock() {
        Ok(store) => store.transactions().to_vec(),
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    let narrative = match state.analysis_service.summarize(&transactions).await {
        Ok(narrative) => narrative,
        Err(error) => {
            tracing::error!("AI analysis failed: {error}");
            FALLBACK_MESSAGE.to_owned()
        }
    };

    analysis_result(&narrative).into_response()
}
