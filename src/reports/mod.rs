//! Reports module
//!
//! Month overview of a budget snapshot for the terminal or CSV.

pub mod budget_overview;

pub use budget_overview::{BudgetOverviewReport, CategoryReportRow, GroupReportRow};
