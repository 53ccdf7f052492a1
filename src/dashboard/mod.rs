//! The dashboard: summary cards, category distribution charts, the 7-day
//! activity chart and the business-unit performance table.

pub mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
