//! Custom error types for DuoBudget
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Frequency;

/// The main error type for DuoBudget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Frequency token outside the closed set
    #[error("Invalid frequency: '{0}' (expected one_time, monthly, quarterly or annual)")]
    InvalidFrequency(String),

    /// A recurring charge with a frequency that cannot recur
    #[error("Recurring charge {charge} has invalid frequency '{frequency}'")]
    InvalidChargeFrequency { charge: String, frequency: Frequency },

    /// Split policy token outside the closed set
    #[error("Invalid split type: '{0}' (expected 50_50, ratio, 33_67, 67_33, 100_user1 or 100_user2)")]
    InvalidSplitType(String),

    /// Account ownership token outside the closed set
    #[error("Invalid account owner: '{0}' (expected joint, user1 or user2)")]
    InvalidAccountOwner(String),

    /// A single record failed validation during a computation
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// Expense references an account the household does not know
    #[error("Expense {expense} references unknown account {account}")]
    UnknownAccount { expense: String, account: String },

    /// Expense paid by someone outside the household
    #[error("Expense {expense} was paid by {payer}, who is not a household partner")]
    UnknownPayer { expense: String, payer: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A short id that matches more than one record
    #[error("Ambiguous id '{query}' matches several records: {}", .candidates.join(", "))]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BudgetError {
    /// Create an error for a record that failed validation
    pub fn invalid_record(id: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidRecord {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recurring charges
    pub fn charge_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recurring charge",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for partners
    pub fn partner_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Partner",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for savings projects
    pub fn project_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Project",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for dependents
    pub fn dependent_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Dependent",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a dependent's purchases
    pub fn child_expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Purchase",
            identifier: identifier.into(),
        }
    }

    /// Create an error for a short id shared by several records
    pub fn ambiguous<I, S>(query: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::Ambiguous {
            query: query.into(),
            candidates: candidates.into_iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was caused by input outside a closed enumeration
    pub fn is_invalid_enum(&self) -> bool {
        matches!(
            self,
            Self::InvalidFrequency(_)
                | Self::InvalidChargeFrequency { .. }
                | Self::InvalidSplitType(_)
                | Self::InvalidAccountOwner(_)
        )
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for DuoBudget operations
pub type BudgetResult<T> = Result<T, BudgetError>;
