//! Chart generation and rendering for the dashboard.
//!
//! Three ECharts visualizations:
//! - **Income sources**: income totals per category as a donut chart
//! - **Expense distribution**: expense totals per category as a donut chart
//! - **Daily activity**: stacked income/expense bars for the last seven
//!   recorded dates
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and initialization script.

use std::collections::HashMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisType, ItemStyle, JsFunction, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::DailyTotal, html::HeadElement};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A donut chart of income totals per category, or `None` when there is no
/// income to show.
pub(super) fn income_sources_chart(totals: HashMap<String, f64>) -> Option<Chart> {
    category_donut("Sumber Pemasukan", totals)
}

/// A donut chart of expense totals per category, or `None` when there is no
/// expense to show.
pub(super) fn expense_distribution_chart(totals: HashMap<String, f64>) -> Option<Chart> {
    category_donut("Distribusi Pengeluaran", totals)
}

fn category_donut(title: &str, totals: HashMap<String, f64>) -> Option<Chart> {
    if totals.is_empty() {
        return None;
    }

    let mut totals: Vec<(f64, String)> = totals
        .into_iter()
        .map(|(category, amount)| (amount, category))
        .collect();
    // Largest slice first so the legend order is meaningful.
    totals.sort_by(|a, b| b.0.total_cmp(&a.0));

    let data: Vec<(f64, &str)> = totals
        .iter()
        .map(|(amount, category)| (*amount, category.as_str()))
        .collect();

    Some(
        Chart::new()
            .title(Title::new().text(title))
            .tooltip(
                Tooltip::new()
                    .trigger(Trigger::Item)
                    .value_formatter(rupiah_formatter()),
            )
            .legend(Legend::new().bottom("0"))
            .series(Pie::new().radius(vec!["45%", "70%"]).data(data)),
    )
}

/// A stacked bar chart of income and expense per date over the last seven
/// recorded dates.
pub(super) fn daily_activity_chart(trend: &[DailyTotal]) -> Chart {
    let labels: Vec<String> = trend.iter().map(|bucket| date_label(bucket)).collect();
    let incomes: Vec<f64> = trend.iter().map(|bucket| bucket.income).collect();
    let expenses: Vec<f64> = trend.iter().map(|bucket| bucket.expense).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Aktivitas Harian")
                .subtext("7 hari terakhir yang tercatat"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(rupiah_formatter()),
        )
        .legend(Legend::new().bottom("0"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("12%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(rupiah_formatter())),
        )
        .series(
            Bar::new()
                .name("Pemasukan")
                .stack("harian")
                .item_style(ItemStyle::new().color("#10b981"))
                .data(incomes),
        )
        .series(
            Bar::new()
                .name("Pengeluaran")
                .stack("harian")
                .item_style(ItemStyle::new().color("#ef4444"))
                .data(expenses),
        )
}

/// A short Indonesian date label, e.g. `05 Okt`.
fn date_label(bucket: &DailyTotal) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
    ];

    format!(
        "{:02} {}",
        bucket.date.day(),
        MONTHS[bucket.date.month() as usize - 1]
    )
}

#[inline]
fn rupiah_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const rupiahFormatter = new Intl.NumberFormat('id-ID', {
              style: 'currency',
              currency: 'IDR',
              maximumFractionDigits: 0
            });
            return (number) ? rupiahFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::macros::date;

    use crate::dashboard::{
        aggregation::DailyTotal,
        charts::{daily_activity_chart, date_label, income_sources_chart},
    };

    #[test]
    fn no_income_yields_no_chart() {
        assert!(income_sources_chart(HashMap::new()).is_none());
    }

    #[test]
    fn donut_options_contain_the_category_slices() {
        let totals = HashMap::from([
            ("Las".to_owned(), 3_500_000.0),
            ("Pangkas".to_owned(), 350_000.0),
        ]);

        let options = income_sources_chart(totals).unwrap().to_string();

        assert!(options.contains("Las"));
        assert!(options.contains("Pangkas"));
        assert!(options.contains("Sumber Pemasukan"));
    }

    #[test]
    fn activity_chart_has_one_label_per_bucket() {
        let trend = vec![
            DailyTotal {
                date: date!(2023 - 10 - 01),
                income: 3_500_000.0,
                expense: 0.0,
            },
            DailyTotal {
                date: date!(2023 - 10 - 05),
                income: 350_000.0,
                expense: 0.0,
            },
        ];

        let options = daily_activity_chart(&trend).to_string();

        assert!(options.contains("01 Okt"));
        assert!(options.contains("05 Okt"));
        assert!(options.contains("Pemasukan"));
        assert!(options.contains("Pengeluaran"));
    }

    #[test]
    fn date_labels_use_indonesian_month_names() {
        let bucket = DailyTotal {
            date: date!(2024 - 05 - 09),
            income: 0.0,
            expense: 0.0,
        };

        assert_eq!(date_label(&bucket), "09 Mei");
    }
}
