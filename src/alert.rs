//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts are returned from HTMX endpoints and swapped out-of-band into the
//! fixed `#alert-container` element rendered by the base template, so any
//! endpoint can show feedback regardless of what its main swap target is.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A user-facing alert message.
#[derive(Debug, Clone)]
pub enum Alert {
    /// An operation succeeded.
    Success {
        /// The headline of the alert.
        message: String,
        /// Additional detail shown under the headline.
        details: String,
    },
    /// An operation succeeded, with no extra detail.
    SuccessSimple {
        /// The headline of the alert.
        message: String,
    },
    /// An operation failed.
    Error {
        /// The headline of the alert.
        message: String,
        /// Additional detail shown under the headline.
        details: String,
    },
    /// An operation failed, with no extra detail.
    ErrorSimple {
        /// The headline of the alert.
        message: String,
    },
}

impl Alert {
    fn into_markup(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, String::new()),
        };

        html! {
            div id="alert-container" hx-swap-oob="true"
            {
                div class=(style) role="alert"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty()
                    {
                        p class="text-sm" { (details) }
                    }
                }
            }
        }
    }
}

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg \
    bg-green-50 dark:bg-gray-800 dark:text-green-400 shadow";

const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg \
    bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow";

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_markup().into_response()
    }
}
