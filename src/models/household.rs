//! Household model: the two partners being reconciled
//!
//! The income ratio derived from the partners' salaries is the only piece of
//! configuration the split resolver needs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::ids::UserId;
use super::money::Money;

/// Which side of the pair a partner sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerRole {
    User1,
    User2,
}

impl PartnerRole {
    /// The other partner
    pub fn other(&self) -> Self {
        match self {
            Self::User1 => Self::User2,
            Self::User2 => Self::User1,
        }
    }
}

/// One of the two reconciled partners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: UserId,
    pub name: String,
    /// Net monthly income, used to weight `Ratio` splits
    #[serde(default)]
    pub salary: Money,
}

impl Partner {
    pub fn new(name: impl Into<String>, salary: Money) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            salary,
        }
    }
}

/// Income share of user1, in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncomeRatio(Decimal);

impl IncomeRatio {
    /// Ratio used when both incomes are zero
    pub const DEGENERATE_FALLBACK: IncomeRatio = IncomeRatio(Decimal::from_parts(5, 0, 0, false, 1));

    /// Build a ratio from an explicit value in `[0, 1]`
    pub fn new(value: Decimal) -> Result<Self, HouseholdValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(HouseholdValidationError::RatioOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// `salary1 / (salary1 + salary2)`, or 0.5 when both are zero
    pub fn from_salaries(salary1: Money, salary2: Money) -> Self {
        let total = salary1 + salary2;
        if total.is_zero() {
            debug!("both incomes are zero, falling back to an even income ratio");
            return Self::DEGENERATE_FALLBACK;
        }
        Self(salary1.amount() / total.amount())
    }

    /// Share of user1
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Share of user2
    pub fn complement(&self) -> Decimal {
        Decimal::ONE - self.0
    }

    /// Share of the given partner
    pub fn share_of(&self, role: PartnerRole) -> Decimal {
        match role {
            PartnerRole::User1 => self.value(),
            PartnerRole::User2 => self.complement(),
        }
    }
}

impl Default for IncomeRatio {
    fn default() -> Self {
        Self::DEGENERATE_FALLBACK
    }
}

impl fmt::Display for IncomeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = (self.0 * Decimal::ONE_HUNDRED).round_dp(0);
        write!(f, "{}% / {}%", pct, Decimal::ONE_HUNDRED - pct)
    }
}

/// The two partners sharing expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub user1: Partner,
    pub user2: Partner,
}

impl Household {
    pub fn new(user1: Partner, user2: Partner) -> Self {
        Self { user1, user2 }
    }

    /// Income ratio derived from the current salaries
    pub fn income_ratio(&self) -> IncomeRatio {
        IncomeRatio::from_salaries(self.user1.salary, self.user2.salary)
    }

    pub fn partner(&self, role: PartnerRole) -> &Partner {
        match role {
            PartnerRole::User1 => &self.user1,
            PartnerRole::User2 => &self.user2,
        }
    }

    pub fn partner_mut(&mut self, role: PartnerRole) -> &mut Partner {
        match role {
            PartnerRole::User1 => &mut self.user1,
            PartnerRole::User2 => &mut self.user2,
        }
    }

    /// Which side `user_id` is on, if they belong to the household
    pub fn role_of(&self, user_id: UserId) -> Option<PartnerRole> {
        if user_id == self.user1.id {
            Some(PartnerRole::User1)
        } else if user_id == self.user2.id {
            Some(PartnerRole::User2)
        } else {
            None
        }
    }

    /// Find a partner by name (case-insensitive), role token or id prefix
    ///
    /// An id prefix shared by both partners finds nobody.
    pub fn find(&self, query: &str) -> Option<PartnerRole> {
        let roles = [PartnerRole::User1, PartnerRole::User2];
        let by_name = roles.into_iter().find(|role| {
            self.partner(*role).name.eq_ignore_ascii_case(query.trim())
                || matches!((*role, query.trim()), (PartnerRole::User1, "user1") | (PartnerRole::User2, "user2"))
        });
        if by_name.is_some() {
            return by_name;
        }

        match roles.map(|role| self.partner(role).id.matches_short(query)) {
            [true, false] => Some(PartnerRole::User1),
            [false, true] => Some(PartnerRole::User2),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), HouseholdValidationError> {
        for role in [PartnerRole::User1, PartnerRole::User2] {
            let partner = self.partner(role);
            if partner.name.trim().is_empty() {
                return Err(HouseholdValidationError::EmptyName(role));
            }
            if partner.salary.is_negative() {
                return Err(HouseholdValidationError::NegativeSalary(role));
            }
            if !partner.salary.is_within_limit() {
                return Err(HouseholdValidationError::SalaryTooLarge(role));
            }
        }
        if self.user1.id == self.user2.id {
            return Err(HouseholdValidationError::SamePartner);
        }
        Ok(())
    }
}

impl Default for Household {
    fn default() -> Self {
        Self::new(
            Partner::new("Partner 1", Money::zero()),
            Partner::new("Partner 2", Money::zero()),
        )
    }
}

/// Validation errors for the household
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HouseholdValidationError {
    EmptyName(PartnerRole),
    NegativeSalary(PartnerRole),
    SalaryTooLarge(PartnerRole),
    SamePartner,
    RatioOutOfRange(Decimal),
}

impl fmt::Display for HouseholdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName(role) => write!(f, "Partner {:?} has an empty name", role),
            Self::NegativeSalary(role) => write!(f, "Partner {:?} has a negative salary", role),
            Self::SalaryTooLarge(role) => write!(f, "Partner {:?} has an implausibly large salary", role),
            Self::SamePartner => write!(f, "Both partners have the same id"),
            Self::RatioOutOfRange(v) => write!(f, "Income ratio {} is outside [0, 1]", v),
        }
    }
}

impl std::error::Error for HouseholdValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn household(s1: i64, s2: i64) -> Household {
        Household::new(
            Partner::new("Alice", Money::from_units(s1)),
            Partner::new("Bob", Money::from_units(s2)),
        )
    }

    #[test]
    fn test_income_ratio_from_salaries() {
        let ratio = household(2600, 2400).income_ratio();
        assert_eq!(ratio.value(), Decimal::new(52, 2));
        assert_eq!(ratio.complement(), Decimal::new(48, 2));
    }

    #[test]
    fn test_degenerate_ratio_falls_back_to_half() {
        let ratio = household(0, 0).income_ratio();
        assert_eq!(ratio.value(), Decimal::new(5, 1));
        assert_eq!(ratio, IncomeRatio::default());
    }

    #[test]
    fn test_ratio_bounds() {
        assert!(IncomeRatio::new(Decimal::new(12, 1)).is_err());
        assert!(IncomeRatio::new(Decimal::new(-1, 1)).is_err());
        assert!(IncomeRatio::new(Decimal::ONE).is_ok());
    }

    #[test]
    fn test_ratio_display() {
        assert_eq!(household(2600, 2400).income_ratio().to_string(), "52% / 48%");
    }

    #[test]
    fn test_role_lookup() {
        let h = household(1, 1);
        assert_eq!(h.role_of(h.user2.id), Some(PartnerRole::User2));
        assert_eq!(h.role_of(UserId::new()), None);
        assert_eq!(h.find("alice"), Some(PartnerRole::User1));
        assert_eq!(h.find("user2"), Some(PartnerRole::User2));
        assert_eq!(h.find("carol"), None);
    }

    #[test]
    fn test_find_partner() {
        let mut h = household(1, 1);
        h.user1.id = "b0000000-0000-4000-8000-000000000001".parse().unwrap();
        h.user2.id = "b1000000-0000-4000-8000-000000000002".parse().unwrap();

        assert_eq!(h.find("ALICE"), Some(PartnerRole::User1));
        assert_eq!(h.find("user2"), Some(PartnerRole::User2));
        assert_eq!(h.find("usr-b1"), Some(PartnerRole::User2));
        assert_eq!(h.find("b"), None);
        assert_eq!(h.find("Carol"), None);
    }

    #[test]
    fn test_validation() {
        assert!(household(1, 1).validate().is_ok());

        let mut h = household(1, 1);
        h.user2.salary = Money::from_units(-5);
        assert_eq!(
            h.validate(),
            Err(HouseholdValidationError::NegativeSalary(PartnerRole::User2))
        );

        let mut h = household(1, 1);
        h.user1.name = " ".into();
        assert_eq!(
            h.validate(),
            Err(HouseholdValidationError::EmptyName(PartnerRole::User1))
        );

        let h = household(20_000_000_000, 1);
        assert_eq!(
            h.validate(),
            Err(HouseholdValidationError::SalaryTooLarge(PartnerRole::User1))
        );
    }
}
