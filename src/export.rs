//! The report exporter: CSV download and a print-oriented view.
//!
//! Both reports operate on the same filtered list as the transactions page;
//! the filter query parameters are carried over unchanged.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use maud::{DOCTYPE, Markup, html};
use time::OffsetDateTime;

use crate::{
    Error,
    dashboard::aggregation::financial_summary,
    html::format_rupiah,
    state::TransactionState,
    store::TransactionStore,
    transaction::Transaction,
    transactions_page::{FilterParams, filter_transactions},
};

/// The fixed CSV column headers.
const CSV_HEADERS: [&str; 5] = ["Tanggal", "Kategori", "Deskripsi", "Tipe", "Jumlah (IDR)"];

/// Serialize `transactions` as a CSV document with the fixed header row.
///
/// Quotes inside descriptions are escaped by doubling, per CSV quoting
/// rules.
pub fn transactions_csv(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|error| Error::CsvExport(error.to_string()))?;

    for transaction in transactions {
        writer
            .write_record([
                transaction.date.to_string(),
                transaction.category.clone(),
                transaction.description.clone(),
                transaction.transaction_type.label().to_owned(),
                plain_amount(transaction.amount),
            ])
            .map_err(|error| Error::CsvExport(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvExport(error.to_string()))
}

/// Renders an amount as a bare number, without currency prefix or grouping,
/// so the column stays machine-readable.
fn plain_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}

/// A route handler that downloads the (filtered) transactions as CSV.
pub async fn get_csv_export<T>(
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

    let filtered = filter_transactions(
        store.transactions(),
        params.active_category(),
        params.from_date(),
        params.to_date(),
    );

    let body = transactions_csv(&filtered)?;
    let filename = format!(
        "laporan_keuangan_{}.csv",
        OffsetDateTime::now_utc().date()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

// ============================================================================
// PRINT VIEW
// ============================================================================

/// The print view is a standalone document: no navigation, no controls, plain
/// CSS instead of the app stylesheet, so the browser's print output is clean.
fn print_view(transactions: &[Transaction], params: &FilterParams) -> Markup {
    let summary = financial_summary(transactions);
    let today = OffsetDateTime::now_utc().date();

    html! {
        (DOCTYPE)
        html lang="id"
        {
            head
            {
                meta charset="UTF-8";
                title { "Laporan Keuangan" }

                style
                {
                    r#"
                    body { font-family: Georgia, 'Times New Roman', serif; color: #111; margin: 2rem; }
                    h1 { margin-bottom: 0.25rem; }
                    p.caption { color: #444; margin: 0.15rem 0; }
                    table { width: 100%; border-collapse: collapse; margin-top: 1.5rem; }
                    th, td { border-bottom: 1px solid #bbb; padding: 0.5rem 0.75rem; text-align: left; }
                    th { border-bottom: 2px solid #111; text-transform: uppercase; font-size: 0.8rem; }
                    td.amount, th.amount { text-align: right; white-space: nowrap; }
                    tfoot td { font-weight: bold; border-bottom: none; }
                    tfoot tr:first-child td { border-top: 2px solid #111; }
                    "#
                }

                script { "window.addEventListener('load', () => window.print());" }
            }

            body
            {
                h1 { "Laporan Keuangan" }

                @match (params.from_date(), params.to_date())
                {
                    (Some(from), Some(to)) => { p class="caption" { "Periode: " (from) " s/d " (to) } }
                    (Some(from), None) => { p class="caption" { "Periode: sejak " (from) } }
                    (None, Some(to)) => { p class="caption" { "Periode: sampai " (to) } }
                    (None, None) => { p class="caption" { "Dicetak pada: " (today) } }
                }

                @if let Some(category) = params.active_category()
                {
                    p class="caption" { "Kategori: " (category) }
                }

                table
                {
                    thead
                    {
                        tr
                        {
                            th { "Tanggal" }
                            th { "Kategori" }
                            th { "Deskripsi" }
                            th { "Tipe" }
                            th class="amount" { "Jumlah" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions
                        {
                            tr
                            {
                                td { (transaction.date) }
                                td { (transaction.category) }
                                td { (transaction.description) }
                                td { (transaction.transaction_type.label()) }
                                td class="amount" { (format_rupiah(transaction.amount)) }
                            }
                        }
                    }

                    tfoot
                    {
                        tr
                        {
                            td colspan="4" { "Total Pemasukan:" }
                            td class="amount" { (format_rupiah(summary.total_income)) }
                        }

                        tr
                        {
                            td colspan="4" { "Total Pengeluaran:" }
                            td class="amount" { (format_rupiah(summary.total_expense)) }
                        }

                        tr
                        {
                            td colspan="4" { "Saldo Akhir:" }
                            td class="amount" { (format_rupiah(summary.balance)) }
                        }
                    }
                }
            }
        }
    }
}

/// A route handler that renders the print view of the (filtered)
/// transactions.
pub async fn get_print_view<T>(
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

    let filtered = filter_transactions(
        store.transactions(),
        params.active_category(),
        params.from_date(),
        params.to_date(),
    );

    Ok(print_view(&filtered, &params).into_response())
}

#[cfg(test)]
mod csv_tests {
    use time::macros::date;

    use crate::{
        export::transactions_csv,
        store::seed_transactions,
        transaction::{Transaction, TransactionId, TransactionType},
    };

    #[test]
    fn csv_starts_with_the_fixed_header() {
        let csv = transactions_csv(&[]).unwrap();

        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "Tanggal,Kategori,Deskripsi,Tipe,Jumlah (IDR)\n"
        );
    }

    #[test]
    fn csv_renders_one_row_per_transaction() {
        let csv = transactions_csv(&seed_transactions()).unwrap();
        let text = String::from_utf8(csv).unwrap();

        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("2023-10-01,Las,Jasa Las Pagar Besi,Pemasukan,3500000"));
        assert!(
            text.contains("2023-10-18,Operasional,Bayar Listrik Workshop,Pengeluaran,500000")
        );
    }

    #[test]
    fn quotes_in_descriptions_are_doubled() {
        let transaction = Transaction {
            id: TransactionId::new("1"),
            date: date!(2023 - 11 - 01),
            description: "Sabun \"Wax\" premium".to_owned(),
            amount: 45_000.0,
            transaction_type: TransactionType::Expense,
            category: "Doorsmeer".to_owned(),
        };

        let csv = transactions_csv(&[transaction]).unwrap();
        let text = String::from_utf8(csv).unwrap();

        assert!(text.contains("\"Sabun \"\"Wax\"\" premium\""));
    }

    #[test]
    fn commas_in_descriptions_are_quoted() {
        let transaction = Transaction {
            id: TransactionId::new("1"),
            date: date!(2023 - 11 - 01),
            description: "Benang, kain, kancing".to_owned(),
            amount: 80_000.0,
            transaction_type: TransactionType::Expense,
            category: "Menjahit".to_owned(),
        };

        let csv = transactions_csv(&[transaction]).unwrap();
        let text = String::from_utf8(csv).unwrap();

        assert!(text.contains("\"Benang, kain, kancing\""));
    }
}

#[cfg(test)]
mod export_route_tests {
    use scraper::{Html, Selector};

    use crate::{endpoints, test_utils::test_server_with_seed_data};

    #[tokio::test]
    async fn csv_download_sets_attachment_headers() {
        let (_directory, _store, server) = test_server_with_seed_data();

        let response = server.get(endpoints::EXPORT_CSV).await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "text/csv; charset=utf-8");
        let disposition = response.header("content-disposition");
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"laporan_keuangan_"));
        assert!(disposition.ends_with(".csv\""));
        assert!(
            response
                .text()
                .starts_with("Tanggal,Kategori,Deskripsi,Tipe,Jumlah (IDR)")
        );
    }

    #[tokio::test]
    async fn csv_download_respects_the_category_filter() {
        let (_directory, _store, server) = test_server_with_seed_data();

        let response = server
            .get(endpoints::EXPORT_CSV)
            .add_query_param("category", "Pangkas")
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Pendapatan Harian Pangkas"));
    }

    #[tokio::test]
    async fn print_view_appends_exactly_three_summary_rows() {
        let (_directory, _store, server) = test_server_with_seed_data();

        let response = server.get(endpoints::PRINT_VIEW).await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        let summary_rows = Selector::parse("tfoot tr").unwrap();
        assert_eq!(document.select(&summary_rows).count(), 3);

        let text = response.text();
        assert!(text.contains("Total Pemasukan:"));
        assert!(text.contains("Total Pengeluaran:"));
        assert!(text.contains("Saldo Akhir:"));
        // Seed data: 6,350,000 income, 1,100,000 expense.
        assert!(text.contains("Rp5,250,000"));
    }

    #[tokio::test]
    async fn print_view_shows_the_active_period() {
        let (_directory, _store, server) = test_server_with_seed_data();

        let response = server
            .get(endpoints::PRINT_VIEW)
            .add_query_param("from", "2023-10-01")
            .add_query_param("to", "2023-10-05")
            .await;

        response.assert_status_ok();
        assert!(
            response
                .text()
                .contains("Periode: 2023-10-01 s/d 2023-10-05")
        );
    }
}
