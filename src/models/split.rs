//! Split policies
//!
//! A split policy says who *consumes* an expense, independently of who paid
//! for it. The resolution of a policy into amounts lives in
//! `services::split`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

/// Closed set of split policies between the two partners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SplitType {
    /// 50/50
    Equal,
    /// Proportional to the partners' incomes
    Ratio,
    /// 33% user1, 67% user2
    OneThird,
    /// 67% user1, 33% user2
    TwoThirds,
    /// Entirely user1's
    FullUser1,
    /// Entirely user2's
    FullUser2,
}

impl SplitType {
    pub const ALL: [SplitType; 6] = [
        SplitType::Equal,
        SplitType::Ratio,
        SplitType::OneThird,
        SplitType::TwoThirds,
        SplitType::FullUser1,
        SplitType::FullUser2,
    ];

    /// Canonical token used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "50_50",
            Self::Ratio => "ratio",
            Self::OneThird => "33_67",
            Self::TwoThirds => "67_33",
            Self::FullUser1 => "100_user1",
            Self::FullUser2 => "100_user2",
        }
    }

    /// Literal percentages of the fixed policies, `None` for `Ratio`
    ///
    /// The fixed-third pair uses 0.33/0.67 as written rather than exact
    /// thirds; the two literals still sum to one.
    pub fn fixed_fractions(&self) -> Option<(Decimal, Decimal)> {
        let half = Decimal::new(5, 1);
        let third = Decimal::new(33, 2);
        let two_thirds = Decimal::new(67, 2);
        match self {
            Self::Equal => Some((half, half)),
            Self::Ratio => None,
            Self::OneThird => Some((third, two_thirds)),
            Self::TwoThirds => Some((two_thirds, third)),
            Self::FullUser1 => Some((Decimal::ONE, Decimal::ZERO)),
            Self::FullUser2 => Some((Decimal::ZERO, Decimal::ONE)),
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Equal => "50 / 50",
            Self::Ratio => "Income ratio",
            Self::OneThird => "33 / 67",
            Self::TwoThirds => "67 / 33",
            Self::FullUser1 => "100% partner 1",
            Self::FullUser2 => "100% partner 2",
        }
    }
}

impl Default for SplitType {
    fn default() -> Self {
        Self::Equal
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitType {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "50_50" | "equal" => Ok(Self::Equal),
            "ratio" | "income" => Ok(Self::Ratio),
            "33_67" => Ok(Self::OneThird),
            "67_33" => Ok(Self::TwoThirds),
            "100_user1" => Ok(Self::FullUser1),
            "100_user2" => Ok(Self::FullUser2),
            _ => Err(BudgetError::InvalidSplitType(s.to_string())),
        }
    }
}

impl TryFrom<String> for SplitType {
    type Error = BudgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SplitType> for String {
    fn from(split: SplitType) -> Self {
        split.as_str().to_string()
    }
}
