//! Dependent allowance models
//!
//! A dependent (usually a child) gets a monthly allowance. Purchases made
//! against it are tracked separately from the partners' shared expenses and
//! never enter the balance between them.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ChildExpenseId, DependentId};
use super::money::Money;

/// Someone living on a monthly allowance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependent {
    pub id: DependentId,
    pub name: String,
    /// Allowance used for months without an explicit one
    #[serde(default)]
    pub default_allowance: Option<Money>,
    pub created_at: DateTime<Utc>,
}

impl Dependent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DependentId::new(),
            name: name.into(),
            default_allowance: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_default_allowance(mut self, amount: Money) -> Self {
        self.default_allowance = Some(amount);
        self
    }

    pub fn validate(&self) -> Result<(), AllowanceValidationError> {
        if self.name.trim().is_empty() {
            return Err(AllowanceValidationError::EmptyName);
        }
        if let Some(amount) = self.default_allowance {
            check_allowance(amount)?;
        }
        Ok(())
    }
}

/// A purchase made by a dependent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildExpense {
    pub id: ChildExpenseId,
    pub dependent_id: DependentId,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    /// Link for online purchases
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl ChildExpense {
    pub fn new(
        dependent_id: DependentId,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ChildExpenseId::new(),
            dependent_id,
            description: description.into(),
            amount,
            date,
            product_url: None,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn month_key(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }

    pub fn validate(&self) -> Result<(), AllowanceValidationError> {
        if self.description.trim().is_empty() {
            return Err(AllowanceValidationError::EmptyDescription);
        }
        if self.description.len() > 500 {
            return Err(AllowanceValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }
        if !self.amount.is_positive() {
            return Err(AllowanceValidationError::NonPositiveAmount(self.amount));
        }
        if !self.amount.is_within_limit() {
            return Err(AllowanceValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for ChildExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// The allowance of one dependent for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAllowance {
    pub dependent_id: DependentId,
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub amount: Money,
    /// Unspent money brought over from the previous month
    #[serde(default)]
    pub carryover: Money,
    /// Marks a one-off month (birthday, holidays, ...)
    #[serde(default)]
    pub is_exceptional: bool,
}

impl MonthlyAllowance {
    pub fn new(dependent_id: DependentId, year: i32, month: u32, amount: Money) -> Self {
        Self {
            dependent_id,
            year,
            month,
            amount,
            carryover: Money::zero(),
            is_exceptional: false,
        }
    }

    pub fn month_key(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    /// Allowance plus carryover
    pub fn available(&self) -> Money {
        self.amount + self.carryover
    }

    pub fn validate(&self) -> Result<(), AllowanceValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(AllowanceValidationError::InvalidMonth(self.month));
        }
        check_allowance(self.amount)?;
        if self.carryover.is_negative() {
            return Err(AllowanceValidationError::NegativeCarryover);
        }
        if !self.carryover.is_within_limit() {
            return Err(AllowanceValidationError::AmountTooLarge(self.carryover));
        }
        Ok(())
    }
}

fn check_allowance(amount: Money) -> Result<(), AllowanceValidationError> {
    if amount.is_negative() {
        return Err(AllowanceValidationError::NegativeAllowance(amount));
    }
    if !amount.is_within_limit() {
        return Err(AllowanceValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

/// The month after `(year, month)`
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowanceValidationError {
    EmptyName,
    EmptyDescription,
    DescriptionTooLong(usize),
    NonPositiveAmount(Money),
    NegativeAllowance(Money),
    NegativeCarryover,
    AmountTooLarge(Money),
    InvalidMonth(u32),
}

impl fmt::Display for AllowanceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Dependent name cannot be empty"),
            Self::EmptyDescription => write!(f, "Purchase description cannot be empty"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Purchase description too long ({} chars, max 500)", len)
            }
            Self::NonPositiveAmount(amount) => {
                write!(f, "Purchase amount must be positive, got {}", amount)
            }
            Self::NegativeAllowance(amount) => {
                write!(f, "Allowance cannot be negative, got {}", amount)
            }
            Self::NegativeCarryover => write!(f, "Carryover cannot be negative"),
            Self::AmountTooLarge(amount) => write!(f, "Amount {} exceeds the allowed limit", amount),
            Self::InvalidMonth(month) => write!(f, "Month {} is not between 1 and 12", month),
        }
    }
}

impl std::error::Error for AllowanceValidationError {}
