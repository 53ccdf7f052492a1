//! The business-unit performance table.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::UnitPerformance,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_rupiah},
};

const AMOUNT_CELL_GREEN: &str = "text-green-600 dark:text-green-400";
const AMOUNT_CELL_RED: &str = "text-red-600 dark:text-red-400";

fn profit_style(profit: f64) -> &'static str {
    if profit >= 0.0 {
        "text-indigo-600 dark:text-indigo-400 font-bold"
    } else {
        "text-orange-600 dark:text-orange-400 font-bold"
    }
}

/// Renders income, expense and profit per business unit.
///
/// Units without any recorded data are computed but not displayed; an empty
/// state is shown when no unit has data yet.
pub(super) fn unit_performance_table(units: &[UnitPerformance]) -> Markup {
    let visible: Vec<&UnitPerformance> = units.iter().filter(|unit| unit.has_data).collect();

    if visible.is_empty() {
        return html! {
            section class="w-full mb-6"
            {
                h2 class="text-lg font-bold mb-4" { "Performa Unit Usaha" }

                div class="bg-white dark:bg-gray-800 rounded-lg p-8 text-center \
                    shadow-sm border border-gray-200 dark:border-gray-700"
                {
                    p class="text-gray-400" { "Belum ada data unit usaha." }
                }
            }
        };
    }

    html! {
        section class="w-full mb-6"
        {
            h2 class="text-lg font-bold mb-4" { "Performa Unit Usaha" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Unit Usaha" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Pemasukan" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Pengeluaran" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Profit" }
                        }
                    }

                    tbody
                    {
                        @for unit in visible
                        {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class={(TABLE_CELL_STYLE) " font-medium \
                                    text-gray-900 dark:text-white"}
                                {
                                    (unit.unit)
                                }

                                td class={(TABLE_CELL_STYLE) " text-right " (AMOUNT_CELL_GREEN)}
                                {
                                    (format_rupiah(unit.income))
                                }

                                td class={(TABLE_CELL_STYLE) " text-right " (AMOUNT_CELL_RED)}
                                {
                                    (format_rupiah(unit.expense))
                                }

                                td class={(TABLE_CELL_STYLE) " text-right " (profit_style(unit.profit))}
                                {
                                    (format_rupiah(unit.profit))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dashboard::{
        aggregation::{UnitPerformance, unit_performance},
        tables::unit_performance_table,
    };
    use crate::store::seed_transactions;

    #[test]
    fn units_without_data_are_not_displayed() {
        let html = unit_performance_table(&unit_performance(&seed_transactions())).into_string();

        // Seed data covers Las, Doorsmeer, Pangkas and Menjahit only.
        assert!(html.contains("Las"));
        assert!(html.contains("Menjahit"));
        assert!(!html.contains("Hidroponik"));
        assert!(!html.contains("Tenun"));
    }

    #[test]
    fn empty_data_renders_the_empty_state() {
        let units: Vec<UnitPerformance> = unit_performance(&[]);

        let html = unit_performance_table(&units).into_string();

        assert!(html.contains("Belum ada data unit usaha."));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn profit_column_shows_the_net_amount() {
        let html = unit_performance_table(&unit_performance(&seed_transactions())).into_string();

        // Menjahit: 2,500,000 income - 150,000 expense.
        assert!(html.contains("Rp2,350,000"));
    }
}
