//! Billing frequency and monthly normalization
//!
//! Amounts are always stored in their native billing frequency. Everything
//! that needs a per-month figure goes through [`Frequency::monthly_equivalent`]
//! or [`Frequency::period_cost`] at read time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::BudgetError;

/// How often an expense or charge is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    /// Paid once; has no steady-state monthly weight
    OneTime,
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    /// All frequencies in display order
    pub const ALL: [Frequency; 4] = [
        Frequency::OneTime,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Annual,
    ];

    /// Canonical token used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }

    /// Whether this frequency repeats
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::OneTime)
    }

    /// Number of billing months per occurrence, `None` for one-time
    pub fn months_per_period(&self) -> Option<u32> {
        match self {
            Self::OneTime => None,
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::Annual => Some(12),
        }
    }

    /// Steady-state monthly weight of `amount`
    ///
    /// One-time amounts contribute nothing: they belong to the period they
    /// fall in, not to a monthly average.
    pub fn monthly_equivalent(&self, amount: Money) -> Money {
        match self.months_per_period() {
            Some(months) => amount.divide(months),
            None => Money::zero(),
        }
    }

    /// Cost that `amount` contributes to the period it falls in
    pub fn period_cost(&self, amount: Money) -> Money {
        match self {
            Self::OneTime => amount,
            _ => self.monthly_equivalent(amount),
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::OneTime => "One-time",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Annual => "Annual",
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::OneTime
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "one_time" | "onetime" | "once" => Ok(Self::OneTime),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" | "yearly" => Ok(Self::Annual),
            _ => Err(BudgetError::InvalidFrequency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = BudgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        frequency.as_str().to_string()
    }
}
