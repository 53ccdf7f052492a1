//! The summary cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{dashboard::aggregation::FinancialSummary, html::format_rupiah};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 p-5 rounded-lg shadow-sm \
    border border-gray-200 dark:border-gray-700";
const CARD_LABEL_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400 font-medium";

/// Renders the three totals cards: income, expense and remaining balance.
pub(super) fn summary_cards(summary: &FinancialSummary) -> Markup {
    let balance_style = if summary.balance >= 0.0 {
        "text-2xl font-bold text-indigo-600 dark:text-indigo-400 break-all"
    } else {
        "text-2xl font-bold text-orange-600 dark:text-orange-400 break-all"
    };

    html! {
        section class="grid grid-cols-1 md:grid-cols-3 gap-4 w-full mb-6"
        {
            div class=(CARD_STYLE)
            {
                p class=(CARD_LABEL_STYLE) { "Total Pemasukan" }
                p class="text-2xl font-bold text-green-600 dark:text-green-400 break-all"
                {
                    (format_rupiah(summary.total_income))
                }
            }

            div class=(CARD_STYLE)
            {
                p class=(CARD_LABEL_STYLE) { "Total Pengeluaran" }
                p class="text-2xl font-bold text-red-600 dark:text-red-400 break-all"
                {
                    (format_rupiah(summary.total_expense))
                }
            }

            div class=(CARD_STYLE)
            {
                p class=(CARD_LABEL_STYLE) { "Sisa Saldo" }
                p class=(balance_style) { (format_rupiah(summary.balance)) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dashboard::{aggregation::FinancialSummary, cards::summary_cards};

    #[test]
    fn cards_show_the_formatted_totals() {
        let html = summary_cards(&FinancialSummary {
            total_income: 6_350_000.0,
            total_expense: 1_100_000.0,
            balance: 5_250_000.0,
        })
        .into_string();

        assert!(html.contains("Rp6,350,000"));
        assert!(html.contains("Rp1,100,000"));
        assert!(html.contains("Rp5,250,000"));
    }

    #[test]
    fn negative_balance_switches_the_accent_color() {
        let html = summary_cards(&FinancialSummary {
            total_income: 100.0,
            total_expense: 500.0,
            balance: -400.0,
        })
        .into_string();

        assert!(html.contains("text-orange-600"));
        assert!(html.contains("-Rp400"));
    }
}
