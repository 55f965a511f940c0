//! Savings project model
//!
//! A savings goal the partners contribute to. Everything beyond the target
//! and the list of contributions is derived.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ProjectId, UserId};
use super::money::Money;

/// A single deposit toward a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub user_id: UserId,
    pub amount: Money,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsProject {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: Money,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
    pub created_at: DateTime<Utc>,
}

impl SavingsProject {
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description: String::new(),
            target_amount,
            deadline: None,
            contributions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Record a contribution
    pub fn add_contribution(
        &mut self,
        user_id: UserId,
        amount: Money,
        date: NaiveDate,
        note: impl Into<String>,
    ) {
        self.contributions.push(Contribution {
            user_id,
            amount,
            note: note.into(),
            date,
        });
    }

    /// Sum of all contributions
    pub fn current_amount(&self) -> Money {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    /// Sum of contributions made by one partner
    pub fn contributed_by(&self, user_id: UserId) -> Money {
        self.contributions
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.amount)
            .sum()
    }

    /// Progress toward the target in percent, capped at 100
    pub fn progress_percentage(&self) -> Decimal {
        if !self.target_amount.is_positive() {
            return Decimal::ZERO;
        }
        let pct = self.current_amount().amount() / self.target_amount.amount()
            * Decimal::ONE_HUNDRED;
        pct.min(Decimal::ONE_HUNDRED).round_dp(1)
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount() >= self.target_amount
    }

    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(ProjectValidationError::NonPositiveTarget);
        }
        if self.contributions.iter().any(|c| !c.amount.is_positive()) {
            return Err(ProjectValidationError::NonPositiveContribution);
        }
        if !self.target_amount.is_within_limit()
            || self.contributions.iter().any(|c| !c.amount.is_within_limit())
        {
            return Err(ProjectValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for SavingsProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {})",
            self.name,
            self.current_amount(),
            self.target_amount
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyName,
    NonPositiveTarget,
    NonPositiveContribution,
    AmountTooLarge,
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Project name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Project target must be positive"),
            Self::NonPositiveContribution => write!(f, "Contributions must be positive"),
            Self::AmountTooLarge => write!(f, "Project amounts exceed the allowed limit"),
        }
    }
}

impl std::error::Error for ProjectValidationError {}
