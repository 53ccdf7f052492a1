//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the financial overview.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying, filtering and deleting transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The CSV download of the (filtered) transaction list.
pub const EXPORT_CSV: &str = "/transactions/export";
/// The print-oriented rendering of the (filtered) transaction list.
pub const PRINT_VIEW: &str = "/transactions/print";
/// The page for requesting an AI analysis of the finances.
pub const ANALYSIS_VIEW: &str = "/analysis";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a single transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route that returns the category dropdown options for a transaction type.
pub const CATEGORY_OPTIONS_API: &str = "/api/categories/options";
/// The route that runs the AI analysis and returns the narrative fragment.
pub const ANALYSIS_API: &str = "/api/analysis";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

#[cfg(test)]
mod endpoints_tests {
    use crate::endpoints::{DELETE_TRANSACTION, format_endpoint};

    #[test]
    fn format_endpoint_replaces_parameter() {
        assert_eq!(
            format_endpoint(DELETE_TRANSACTION, "1697021927000"),
            "/api/transactions/1697021927000"
        );
    }

    #[test]
    fn format_endpoint_returns_path_without_parameter_unchanged() {
        assert_eq!(format_endpoint("/transactions", "42"), "/transactions");
    }
}
