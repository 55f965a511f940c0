//! Expense model
//!
//! An expense is an actual payment: someone pulled a card from some account.
//! The amount is stored in the expense's native billing frequency and is
//! normalized only when read.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::Frequency;
use super::ids::{AccountId, CategoryId, ExpenseId, ProjectId, UserId};
use super::money::{Money, MAX_AMOUNT_UNITS};
use super::split::SplitType;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Short label (e.g., "Rent")
    pub label: String,

    /// Free-form notes
    #[serde(default)]
    pub description: String,

    /// Amount in the native frequency, always positive
    pub amount: Money,

    /// Date the expense was paid
    pub date: NaiveDate,

    /// Billing frequency
    #[serde(default)]
    pub frequency: Frequency,

    /// Who consumes the expense
    #[serde(default)]
    pub split_type: SplitType,

    pub category_id: CategoryId,

    /// Account the payment came out of
    pub account_id: AccountId,

    /// Partner who made the payment
    pub payer_id: UserId,

    /// Savings project this expense belongs to
    #[serde(default)]
    pub project_id: Option<ProjectId>,

    /// Whether the expense is expected to repeat
    #[serde(default)]
    pub is_recurring: bool,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a one-time, evenly split expense
    pub fn new(
        label: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category_id: CategoryId,
        account_id: AccountId,
        payer_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            label: label.into(),
            description: String::new(),
            amount,
            date,
            frequency: Frequency::default(),
            split_type: SplitType::default(),
            category_id,
            account_id,
            payer_id,
            project_id: None,
            is_recurring: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the billing frequency; a repeating frequency marks the expense recurring
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self.is_recurring = frequency.is_recurring();
        self
    }

    pub fn with_split(mut self, split_type: SplitType) -> Self {
        self.split_type = split_type;
        self
    }

    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Change the amount
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Change the split policy
    pub fn set_split(&mut self, split_type: SplitType) {
        self.split_type = split_type;
        self.updated_at = Utc::now();
    }

    /// Steady-state monthly weight (zero for one-time expenses)
    pub fn monthly_equivalent(&self) -> Money {
        self.frequency.monthly_equivalent(self.amount)
    }

    /// Cost this expense contributes to the period it falls in
    pub fn period_cost(&self) -> Money {
        self.frequency.period_cost(self.amount)
    }

    /// (year, month) the expense falls in
    pub fn month_key(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.label.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyLabel);
        }

        if self.label.len() > 255 {
            return Err(ExpenseValidationError::LabelTooLong(self.label.len()));
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.label,
            self.amount,
            self.frequency.label()
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyLabel,
    LabelTooLong(usize),
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Expense label cannot be empty"),
            Self::LabelTooLong(len) => {
                write!(f, "Expense label too long ({} chars, max 255)", len)
            }
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Expense amount {} exceeds the limit of {}",
                amount,
                Money::from_units(MAX_AMOUNT_UNITS)
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: Money) -> Expense {
        Expense::new(
            "Rent",
            amount,
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            CategoryId::new(),
            AccountId::new(),
            UserId::new(),
        )
    }

    #[test]
    fn test_new_expense_defaults() {
        let e = expense(Money::from_units(1200));
        assert_eq!(e.frequency, Frequency::OneTime);
        assert_eq!(e.split_type, SplitType::Equal);
        assert!(!e.is_recurring);
        assert!(e.project_id.is_none());
        assert_eq!(e.month_key(), (2025, 3));
    }

    #[test]
    fn test_builder_marks_recurring() {
        let e = expense(Money::from_units(300)).with_frequency(Frequency::Quarterly);
        assert!(e.is_recurring);
        assert_eq!(e.monthly_equivalent(), Money::from_units(100));
        assert_eq!(e.period_cost(), Money::from_units(100));
    }

    #[test]
    fn test_one_time_period_cost() {
        let e = expense(Money::from_units(80));
        assert_eq!(e.monthly_equivalent(), Money::zero());
        assert_eq!(e.period_cost(), Money::from_units(80));
    }

    #[test]
    fn test_validation() {
        assert!(expense(Money::from_units(10)).validate().is_ok());

        assert!(matches!(
            expense(Money::zero()).validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            expense(Money::from_units(-3)).validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));

        assert!(matches!(
            expense(Money::new(rust_decimal::Decimal::MAX)).validate(),
            Err(ExpenseValidationError::AmountTooLarge(_))
        ));

        let mut e = expense(Money::from_units(10));
        e.label = "   ".into();
        assert_eq!(e.validate(), Err(ExpenseValidationError::EmptyLabel));
    }

    #[test]
    fn test_serialization_rejects_unknown_split() {
        let e = expense(Money::from_units(10)).with_split(SplitType::Ratio);
        let mut json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["split_type"], "ratio");

        json["split_type"] = serde_json::Value::String("100_marie".into());
        assert!(serde_json::from_value::<Expense>(json).is_err());
    }
}
