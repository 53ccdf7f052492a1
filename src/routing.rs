//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    ai::AnalysisService,
    analysis::{get_analysis_page, post_analysis},
    dashboard::get_dashboard_page,
    endpoints,
    export::{get_csv_export, get_print_view},
    html::error_view,
    not_found::get_404_not_found,
    state::AppState,
    store::TransactionStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_category_options,
        get_new_transaction_page,
    },
    transactions_page::get_transactions_page,
};

/// Return a router with all the app's routes.
pub fn build_router<T, A>(state: AppState<T, A>) -> Router
where
    T: TransactionStore + Send + Sync + 'static,
    A: AnalysisService + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page::<T>))
        .route(
            endpoints::TRANSACTIONS_VIEW,
            get(get_transactions_page::<T>),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(endpoints::EXPORT_CSV, get(get_csv_export::<T>))
        .route(endpoints::PRINT_VIEW, get(get_print_view::<T>))
        .route(endpoints::ANALYSIS_VIEW, get(get_analysis_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint::<T>),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint::<T>),
        )
        .route(endpoints::CATEGORY_OPTIONS_API, get(get_category_options))
        .route(endpoints::ANALYSIS_API, post(post_analysis::<T, A>))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

async fn get_internal_server_error_page() -> Response {
    render_internal_server_error()
}

/// The 500 page, also used as the response body for unexpected errors.
pub(crate) fn render_internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view(
            "Terjadi Kesalahan",
            "500",
            "Maaf, terjadi kesalahan pada server.",
            "Coba lagi nanti atau periksa log server.",
        ),
    )
        .into_response()
}
