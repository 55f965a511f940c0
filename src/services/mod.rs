//! Service layer for DuoBudget
//!
//! The computation services (split, ledger, balance, projection) are pure
//! functions over borrowed records. The record services (expense, charge,
//! category, account, child) sit on top of the storage layer and handle validation
//! and persistence.

pub mod account;
pub mod allowance;
pub mod balance;
pub mod category;
pub mod charge;
pub mod expense;
pub mod filter;
pub mod ledger;
pub mod project;
pub mod projection;
pub mod split;

pub use account::AccountService;
pub use allowance::{
    calculate_carryover, compute_allowance_status, AllowanceStatus, ChildPurchaseInput,
    ChildService,
};
pub use balance::{compute_balance, BalanceEngine, BalanceResult, Settlement};
pub use category::{CategoryService, CategoryUsage};
pub use charge::ChargeService;
pub use expense::{CreateExpenseInput, ExpenseService};
pub use filter::ExpenseFilter;
pub use ledger::{Ledger, LedgerAggregate, Payer};
pub use project::{project_progress, ProjectProgress};
pub use projection::{compute_monthly_projection, BudgetSummary, ProjectedCharge};
pub use split::{theoretical_shares, Shares};
