//! DuoBudget - shared-expense tracking for two partners
//!
//! This library records what a couple spends, resolves how each expense is
//! split between the partners and reconciles who owes whom. It also projects
//! the monthly and annual cost of recurring charges, and keeps track of a
//! dependent's monthly allowance with carryover.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, partners, accounts, charges, etc.)
//! - `storage`: JSON snapshot storage layer
//! - `services`: Split resolution, aggregation, balance and projection
//! - `reports`: Report generation with terminal and CSV output
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `duobudget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use duo_budget::{compute_balance, compute_monthly_projection};
//!
//! let result = compute_balance(&expenses, &household, &accounts, Decimal::ONE)?;
//! println!("{}", result.statement);
//!
//! let summary = compute_monthly_projection(&charges)?;
//! println!("{} per month", summary.total_monthly);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
pub use reports::{compute_category_breakdown, compute_monthly_history};
pub use services::{compute_allowance_status, compute_balance, compute_monthly_projection};
