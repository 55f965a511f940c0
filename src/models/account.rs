//! Account model
//!
//! Bank accounts matter to the engine only through their owner: spending from
//! the joint account is balance-neutral, spending from a personal account is
//! an advance that has to be settled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::household::PartnerRole;
use super::ids::AccountId;
use crate::error::BudgetError;

/// Who an account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AccountOwner {
    /// Shared pool, assumed to already reflect the agreed split
    Joint,
    User1,
    User2,
}

impl AccountOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joint => "joint",
            Self::User1 => "user1",
            Self::User2 => "user2",
        }
    }

    /// Whether payments from this account are excluded from the balance
    pub fn is_joint(&self) -> bool {
        matches!(self, Self::Joint)
    }

    /// The partner owning this account, `None` for the joint account
    pub fn partner(&self) -> Option<PartnerRole> {
        match self {
            Self::Joint => None,
            Self::User1 => Some(PartnerRole::User1),
            Self::User2 => Some(PartnerRole::User2),
        }
    }
}

impl fmt::Display for AccountOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountOwner {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "joint" | "shared" => Ok(Self::Joint),
            "user1" => Ok(Self::User1),
            "user2" => Ok(Self::User2),
            _ => Err(BudgetError::InvalidAccountOwner(s.to_string())),
        }
    }
}

impl TryFrom<String> for AccountOwner {
    type Error = BudgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountOwner> for String {
    fn from(owner: AccountOwner) -> Self {
        owner.as_str().to_string()
    }
}

/// A bank account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Joint checking")
    pub name: String,

    /// Ownership tag
    pub owner: AccountOwner,

    /// Free-form notes
    #[serde(default)]
    pub description: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    pub fn new(name: impl Into<String>, owner: AccountOwner) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            owner,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Create the shared account
    pub fn joint(name: impl Into<String>) -> Self {
        Self::new(name, AccountOwner::Joint)
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.owner)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
