//! The dashboard route handler.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    dashboard::{
        aggregation::{category_totals, daily_trend, financial_summary, unit_performance},
        cards::summary_cards,
        charts::{
            DashboardChart, charts_script, charts_view, daily_activity_chart,
            expense_distribution_chart, income_sources_chart,
        },
        tables::unit_performance_table,
    },
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    state::TransactionState,
    store::TransactionStore,
    transaction::TransactionType,
};

/// Display a page with an overview of the recorded finances.
pub async fn get_dashboard_page<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Response, Error>
where
    T: TransactionStore + Send + Sync,
{
    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLock)?;
    let transactions = store.transactions().to_vec();
    drop(store);

    let summary = financial_summary(&transactions);
    let units = unit_performance(&transactions);
    let trend = daily_trend(&transactions);

    let mut charts = Vec::with_capacity(3);

    if let Some(chart) =
        income_sources_chart(category_totals(&transactions, TransactionType::Income))
    {
        charts.push(DashboardChart {
            id: "income-sources-chart",
            options: chart.to_string(),
        });
    }

    if let Some(chart) =
        expense_distribution_chart(category_totals(&transactions, TransactionType::Expense))
    {
        charts.push(DashboardChart {
            id: "expense-distribution-chart",
            options: chart.to_string(),
        });
    }

    if !trend.is_empty() {
        charts.push(DashboardChart {
            id: "daily-activity-chart",
            options: daily_activity_chart(&trend).to_string(),
        });
    }

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    Ok(base(
        "Dasbor",
        &[charts_script(&charts)],
        &html! {
            (nav_bar.into_html())

            div class=(PAGE_CONTAINER_STYLE)
            {
                div class="w-full max-w-screen-xl"
                {
                    h1 class="text-xl font-bold mb-4" { "Dasbor Keuangan" }

                    (summary_cards(&summary))
                    (unit_performance_table(&units))
                    (charts_view(&charts))
                }
            }
        },
    )
    .into_response())
}
