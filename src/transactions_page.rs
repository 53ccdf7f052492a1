//! The transactions page: a filterable, date-descending list with per-row
//! delete and links to the CSV export and print views.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    category::all_categories,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_rupiah,
    },
    navigation::NavBar,
    state::TransactionState,
    store::TransactionStore,
    transaction::{Transaction, TransactionType},
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The query parameters shared by the transactions page, the CSV export and
/// the print view. Empty strings are treated as absent filters, which is what
/// a submitted form with untouched inputs produces.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    /// The category to keep, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// The inclusive lower date bound (`YYYY-MM-DD`), if any.
    #[serde(default)]
    pub from: Option<String>,
    /// The inclusive upper date bound (`YYYY-MM-DD`), if any.
    #[serde(default)]
    pub to: Option<String>,
}

impl FilterParams {
    /// The category filter, with the empty string treated as absent.
    pub fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|category| !category.is_empty())
    }

    /// The parsed lower bound. Unparseable input is ignored.
    pub fn from_date(&self) -> Option<Date> {
        parse_date(self.from.as_deref())
    }

    /// The parsed upper bound. Unparseable input is ignored.
    pub fn to_date(&self) -> Option<Date> {
        parse_date(self.to.as_deref())
    }

    /// Whether any filter is in effect.
    pub fn is_active(&self) -> bool {
        self.active_category().is_some() || self.from_date().is_some() || self.to_date().is_some()
    }
}

fn parse_date(text: Option<&str>) -> Option<Date> {
    text.filter(|text| !text.is_empty())
        .and_then(|text| Date::parse(text, DATE_FORMAT).ok())
}

/// Keeps the transactions matching every active filter, sorted by date
/// descending.
///
/// Date bounds are inclusive on both ends; transactions sharing a date have
/// no guaranteed relative order.
pub fn filter_transactions(
    transactions: &[Transaction],
    category: Option<&str>,
    from: Option<Date>,
    to: Option<Date>,
) -> Vec<Transaction> {
    let mut result: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| category.is_none_or(|category| transaction.category == category))
        .filter(|transaction| from.is_none_or(|from| transaction.date >= from))
        .filter(|transaction| to.is_none_or(|to| transaction.date <= to))
        .cloned()
        .collect();

    result.sort_by(|a, b| b.date.cmp(&a.date));
    result
}

// ============================================================================
// TEMPLATES
// ============================================================================

fn filter_form(params: &FilterParams) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="w-full bg-white dark:bg-gray-800 rounded-lg shadow-sm border \
                border-gray-200 dark:border-gray-700 p-4 mb-4"
        {
            h2 class="font-semibold mb-3" { "Filter Transaksi" }

            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Kategori" }
                    select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "Semua Kategori" }

                        @for category in all_categories()
                        {
                            option
                                value=(category)
                                selected[params.active_category() == Some(category)]
                            {
                                (category)
                            }
                        }
                    }
                }

                div
                {
                    label for="from" class=(FORM_LABEL_STYLE) { "Dari Tanggal" }
                    input
                        type="date"
                        name="from"
                        id="from"
                        value=(params.from.clone().unwrap_or_default())
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="to" class=(FORM_LABEL_STYLE) { "Sampai Tanggal" }
                    input
                        type="date"
                        name="to"
                        id="to"
                        value=(params.to.clone().unwrap_or_default())
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div class="flex gap-4 mt-4"
            {
                button
                    type="submit"
                    class="px-4 py-2 bg-blue-500 dark:bg-blue-600 hover:bg-blue-600 \
                        hover:dark:bg-blue-700 text-white rounded text-sm"
                {
                    "Terapkan Filter"
                }

                @if params.is_active()
                {
                    a
                        href=(endpoints::TRANSACTIONS_VIEW)
                        class="px-4 py-2 text-sm text-red-600 bg-red-50 hover:bg-red-100 \
                            dark:bg-gray-700 dark:text-red-400 rounded"
                    {
                        "Reset Filter"
                    }
                }
            }
        }
    }
}

/// A small GET form posing as a button so the browser handles the query
/// string encoding of the carried filters.
fn report_button(action: &str, params: &FilterParams, label: &str) -> Markup {
    html! {
        form method="get" action=(action) class="inline"
        {
            @if let Some(category) = params.active_category()
            {
                input type="hidden" name="category" value=(category);
            }

            @if let Some(from) = &params.from
            {
                @if !from.is_empty() { input type="hidden" name="from" value=(from); }
            }

            @if let Some(to) = &params.to
            {
                @if !to.is_empty() { input type="hidden" name="to" value=(to); }
            }

            button
                type="submit"
                class="px-4 py-2 text-sm bg-gray-100 hover:bg-gray-200 dark:bg-gray-700 \
                    dark:hover:bg-gray-600 rounded"
            {
                (label)
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (amount_style, sign) = match transaction.transaction_type {
        TransactionType::Income => ("text-green-600 dark:text-green-400 font-bold", "+"),
        TransactionType::Expense => ("text-red-600 dark:text-red-400 font-bold", "-"),
    };

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }

            td class=(TABLE_CELL_STYLE)
            {
                span
                    class="px-2.5 py-1 rounded-lg bg-gray-100 dark:bg-gray-700 \
                        text-xs font-medium"
                {
                    (transaction.category)
                }
            }

            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type.label()) }

            td class={(TABLE_CELL_STYLE) " text-right " (amount_style)}
            {
                (sign) (format_rupiah(transaction.amount))
            }

            td class={(TABLE_CELL_STYLE) " text-center"}
            {
                button
                    hx-delete=(endpoints::format_endpoint(
                        endpoints::DELETE_TRANSACTION,
                        transaction.id.as_str(),
                    ))
                    hx-target="closest tr"
                    hx-swap="delete"
                    hx-confirm="Hapus transaksi ini?"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Hapus"
                }
            }
        }
    }
}

fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="w-full overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Tanggal" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Kategori" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Deskripsi" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Tipe" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Jumlah" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-center"} { "Aksi" }
                    }
                }

                tbody
                {
                    @for transaction in transactions
                    {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn empty_state(store_is_empty: bool) -> Markup {
    let message = if store_is_empty {
        "Belum ada transaksi."
    } else {
        "Tidak ada transaksi yang cocok dengan filter."
    };

    html! {
        div class="w-full bg-white dark:bg-gray-800 rounded-lg p-8 text-center \
            shadow-sm border border-gray-200 dark:border-gray-700"
        {
            p class="text-gray-400" { (message) }
        }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// Display the filterable transactions list.
pub async fn get_transactions_page<T>(
    State(state): State<TransactionState<T>>,
    Query(params): Query<FilterParams>,
) -> Result<Response, Error>
where
    T: TransactionStore + Send + Sync,
{
    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLock)?;

    let store_is_empty = store.transactions().is_empty();
    let filtered = filter_transactions(
        store.transactions(),
        params.active_category(),
        params.from_date(),
        params.to_date(),
    );

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);

    Ok(base(
        "Transaksi",
        &[],
        &html! {
            (nav_bar.into_html())

            div class=(PAGE_CONTAINER_STYLE)
            {
                div class="w-full max-w-screen-xl"
                {
                    div class="flex flex-wrap justify-between items-center mb-4 gap-2"
                    {
                        h1 class="text-xl font-bold" { "Daftar Transaksi" }

                        div class="flex gap-2"
                        {
                            (report_button(endpoints::EXPORT_CSV, &params, "Export CSV"))
                            (report_button(endpoints::PRINT_VIEW, &params, "Cetak / PDF"))
                        }
                    }

                    (filter_form(&params))

                    @if filtered.is_empty()
                    {
                        (empty_state(store_is_empty))
                    }
                    @else
                    {
                        (transactions_table(&filtered))
                    }
                }
            }
        },
    )
    .into_response())
}

#[cfg(test)]
mod filter_tests {
    use time::macros::date;

    use crate::{
        store::seed_transactions,
        transactions_page::{FilterParams, filter_transactions},
    };

    #[test]
    fn no_filters_returns_everything_date_descending() {
        let transactions = seed_transactions();

        let filtered = filter_transactions(&transactions, None, None, None);

        assert_eq!(filtered.len(), transactions.len());
        assert!(
            filtered
                .windows(2)
                .all(|pair| pair[0].date >= pair[1].date)
        );
    }

    #[test]
    fn category_filter_keeps_exact_matches_only() {
        let filtered = filter_transactions(&seed_transactions(), Some("Menjahit"), None, None);

        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .iter()
                .all(|transaction| transaction.category == "Menjahit")
        );
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filtered = filter_transactions(
            &seed_transactions(),
            None,
            Some(date!(2023 - 10 - 02)),
            Some(date!(2023 - 10 - 10)),
        );

        let dates: Vec<_> = filtered
            .iter()
            .map(|transaction| transaction.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                date!(2023 - 10 - 10),
                date!(2023 - 10 - 05),
                date!(2023 - 10 - 02)
            ]
        );
    }

    #[test]
    fn equal_bounds_return_exactly_that_date() {
        let day = date!(2023 - 10 - 05);

        let filtered = filter_transactions(&seed_transactions(), None, Some(day), Some(day));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, day);
    }

    #[test]
    fn empty_strings_are_treated_as_absent_filters() {
        let params = FilterParams {
            category: Some(String::new()),
            from: Some(String::new()),
            to: Some(String::new()),
        };

        assert_eq!(params.active_category(), None);
        assert_eq!(params.from_date(), None);
        assert_eq!(params.to_date(), None);
        assert!(!params.is_active());
    }

    #[test]
    fn unparseable_dates_are_ignored() {
        let params = FilterParams {
            category: None,
            from: Some("not-a-date".to_owned()),
            to: None,
        };

        assert_eq!(params.from_date(), None);
    }
}

#[cfg(test)]
mod transactions_route_tests {
    use scraper::{Html, Selector};

    use crate::{endpoints, test_utils::test_server_with_seed_data};

    #[tokio::test]
    async fn page_lists_seed_transactions_date_descending() {
        let (_directory, _store, server) = test_server_with_seed_data();

        let response = server.get(endpoints::TRANSACTIONS_VIEW).await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        let cell_selector = Selector::parse("tbody td:first-child").unwrap();
        let dates: Vec<String> = document
            .select(&cell_selector)
            .map(|cell| cell.text().collect())
            .collect();

        assert_eq!(dates.first().map(String::as_str), Some("2023-10-18"));
        assert_eq!(dates.last().map(String::as_str), Some("2023-10-01"));
    }

    #[tokio::test]
    async fn category_filter_narrows_the_table() {
        let (_directory, _store, server) = test_server_with_seed_data();

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("category", "Las")
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Jasa Las Pagar Besi"));
        assert!(!text.contains("Borongan Jahit Seragam"));
    }

    #[tokio::test]
    async fn delete_endpoint_removes_the_transaction() {
        let (_directory, store, server) = test_server_with_seed_data();

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::DELETE_TRANSACTION,
                "1",
            ))
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Transaksi berhasil dihapus"));

        use crate::store::TransactionStore;
        let store = store.lock().unwrap();
        assert!(
            store
                .transactions()
                .iter()
                .all(|transaction| transaction.id.as_str() != "1")
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_id_reports_not_found() {
        let (_directory, store, server) = test_server_with_seed_data();

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::DELETE_TRANSACTION,
                "no-such-id",
            ))
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Transaksi tidak ditemukan"));

        use crate::store::TransactionStore;
        let store = store.lock().unwrap();
        assert_eq!(store.transactions().len(), 6);
    }

    #[tokio::test]
    async fn create_endpoint_persists_a_transaction_and_redirects() {
        let (_directory, store, server) = test_server_with_seed_data();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("type_", "income"),
                ("amount", "125000"),
                ("category", "Tenun"),
                ("date", "2024-03-01"),
                ("description", "Selendang pesanan"),
            ])
            .await;

        response.assert_status_see_other();
        assert_eq!(
            response.header("hx-redirect"),
            endpoints::TRANSACTIONS_VIEW
        );

        use crate::store::TransactionStore;
        let store = store.lock().unwrap();
        let created = store.transactions().last().unwrap();
        assert_eq!(created.description, "Selendang pesanan");
        assert_eq!(created.amount, 125_000.0);
    }

    #[tokio::test]
    async fn create_endpoint_rejects_invalid_input_with_an_alert() {
        let (_directory, store, server) = test_server_with_seed_data();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("type_", "income"),
                ("amount", "0"),
                ("category", "Tenun"),
                ("date", "2024-03-01"),
                ("description", "Gratisan"),
            ])
            .await;

        response.assert_status_ok();
        assert!(
            response
                .text()
                .contains("Jumlah harus berupa angka lebih besar dari nol")
        );

        use crate::store::TransactionStore;
        let store = store.lock().unwrap();
        assert_eq!(store.transactions().len(), 6);
    }
}
