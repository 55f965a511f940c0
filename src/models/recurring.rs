//! Recurring charge model
//!
//! A recurring charge is a planning line (rent, insurance, a subscription),
//! not a payment. It feeds the budget projection and never the balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::Frequency;
use super::ids::{CategoryId, ChargeId};
use super::money::Money;

/// A fixed charge expected to repeat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringCharge {
    pub id: ChargeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Amount per billing period
    pub amount: Money,
    pub frequency: Frequency,
    pub category_id: CategoryId,
    /// Inactive charges are kept but left out of projections
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl RecurringCharge {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        frequency: Frequency,
        category_id: CategoryId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ChargeId::new(),
            name: name.into(),
            description: String::new(),
            amount,
            frequency,
            category_id,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn monthly(name: impl Into<String>, amount: Money, category_id: CategoryId) -> Self {
        Self::new(name, amount, Frequency::Monthly, category_id)
    }

    pub fn annual(name: impl Into<String>, amount: Money, category_id: CategoryId) -> Self {
        Self::new(name, amount, Frequency::Annual, category_id)
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ChargeValidationError> {
        if self.name.trim().is_empty() {
            return Err(ChargeValidationError::EmptyName);
        }

        if !self.amount.is_positive() {
            return Err(ChargeValidationError::NonPositiveAmount);
        }

        if !self.amount.is_within_limit() {
            return Err(ChargeValidationError::AmountTooLarge);
        }

        if !self.frequency.is_recurring() {
            return Err(ChargeValidationError::NotRecurring);
        }

        Ok(())
    }
}

impl fmt::Display for RecurringCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.amount, self.frequency.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeValidationError {
    EmptyName,
    NonPositiveAmount,
    AmountTooLarge,
    NotRecurring,
}

impl fmt::Display for ChargeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Charge name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Charge amount must be positive"),
            Self::AmountTooLarge => write!(f, "Charge amount exceeds the allowed limit"),
            Self::NotRecurring => write!(f, "A recurring charge cannot be one-time"),
        }
    }
}

impl std::error::Error for ChargeValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_charge() {
        let charge = RecurringCharge::monthly("Rent", Money::from_units(1200), CategoryId::new());
        assert!(charge.active);
        assert_eq!(charge.frequency, Frequency::Monthly);
        assert!(charge.validate().is_ok());
    }

    #[test]
    fn test_one_time_charge_is_invalid() {
        let charge = RecurringCharge::new(
            "Sofa",
            Money::from_units(900),
            Frequency::OneTime,
            CategoryId::new(),
        );
        assert_eq!(charge.validate(), Err(ChargeValidationError::NotRecurring));
    }

    #[test]
    fn test_validation() {
        let zero = RecurringCharge::annual("Insurance", Money::zero(), CategoryId::new());
        assert_eq!(zero.validate(), Err(ChargeValidationError::NonPositiveAmount));

        let unnamed = RecurringCharge::annual("", Money::from_units(1), CategoryId::new());
        assert_eq!(unnamed.validate(), Err(ChargeValidationError::EmptyName));

        let huge = RecurringCharge::monthly(
            "Castle",
            Money::from_units(20_000_000_000),
            CategoryId::new(),
        );
        assert_eq!(huge.validate(), Err(ChargeValidationError::AmountTooLarge));
    }

    #[test]
    fn test_deactivate() {
        let mut charge = RecurringCharge::monthly("Gym", Money::from_units(30), CategoryId::new());
        charge.deactivate();
        assert!(!charge.active);
        charge.activate();
        assert!(charge.active);
    }
}
