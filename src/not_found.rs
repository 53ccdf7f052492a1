//! The 404 page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The fallback route handler for URLs that match nothing.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a 404 response with the not-found page.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Halaman Tidak Ditemukan",
            "404",
            "Halaman tidak ditemukan.",
            "Periksa kembali alamat yang Anda masukkan.",
        ),
    )
        .into_response()
}
