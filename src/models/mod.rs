//! Core data models for DuoBudget
//!
//! This module contains the records the engine folds over (expenses,
//! recurring charges, accounts, categories, savings projects), the
//! household whose two partners are being reconciled, and the allowance
//! records of their dependents.

pub mod account;
pub mod category;
pub mod child;
pub mod expense;
pub mod frequency;
pub mod household;
pub mod ids;
pub mod money;
pub mod project;
pub mod recurring;
pub mod split;

pub use account::{Account, AccountOwner};
pub use category::Category;
pub use child::{ChildExpense, Dependent, MonthlyAllowance};
pub use expense::Expense;
pub use frequency::Frequency;
pub use household::{Household, IncomeRatio, Partner, PartnerRole};
pub use ids::{
    AccountId, CategoryId, ChargeId, ChildExpenseId, DependentId, ExpenseId, ProjectId, UserId,
};
pub use money::{Money, DEFAULT_CURRENCY_SYMBOL, MAX_AMOUNT_UNITS};
pub use project::{Contribution, SavingsProject};
pub use recurring::RecurringCharge;
pub use split::SplitType;
