//! Reports module for DuoBudget
//!
//! Each report is generated from the loaded snapshot and can be printed to
//! the terminal or exported as CSV.

pub mod balance;
pub mod breakdown;
pub mod history;
pub mod projection;
pub mod projects;

pub use balance::BalanceReport;
pub use breakdown::{
    compute_category_breakdown, CategoryBreakdownReport, CategoryBreakdownRow, CategoryTotal,
};
pub use history::{compute_monthly_history, MonthlyHistoryEntry, MonthlyHistoryReport};
pub use projection::ProjectionReport;
pub use projects::ProjectsReport;
