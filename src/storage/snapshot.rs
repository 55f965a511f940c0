//! On-disk snapshot of a household's records

use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::category::DEFAULT_CATEGORIES;
use crate::models::{
    Account, AccountOwner, Category, ChildExpense, Dependent, Expense, Household, Money,
    MonthlyAllowance, Partner, RecurringCharge, SavingsProject,
};

/// Current snapshot schema
pub const SCHEMA_VERSION: u32 = 1;

/// Everything the engine needs, as stored in `household.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub household: Household,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub recurring_charges: Vec<RecurringCharge>,
    #[serde(default)]
    pub projects: Vec<SavingsProject>,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
    #[serde(default)]
    pub child_expenses: Vec<ChildExpense>,
    #[serde(default)]
    pub allowances: Vec<MonthlyAllowance>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Snapshot {
    /// Empty snapshot for the given household
    pub fn new(household: Household) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            household,
            accounts: Vec::new(),
            categories: Vec::new(),
            expenses: Vec::new(),
            recurring_charges: Vec::new(),
            projects: Vec::new(),
            dependents: Vec::new(),
            child_expenses: Vec::new(),
            allowances: Vec::new(),
        }
    }

    /// Fresh household with starter categories, a joint account and one
    /// personal account per partner
    pub fn starter(user1: &str, user2: &str) -> Self {
        let household = Household::new(
            Partner::new(user1, Money::zero()),
            Partner::new(user2, Money::zero()),
        );
        let mut snapshot = Self::new(household);

        snapshot.categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color, icon)| Category::styled(*name, *color, Some(*icon)))
            .collect();

        snapshot.accounts = vec![
            Account::joint("Joint"),
            Account::new(format!("{} personal", user1), AccountOwner::User1),
            Account::new(format!("{} personal", user2), AccountOwner::User2),
        ];

        snapshot
    }

    /// Check the household and the reference records expenses point at
    pub fn validate(&self) -> BudgetResult<()> {
        self.household
            .validate()
            .map_err(|e| BudgetError::Validation(format!("Invalid household: {}", e)))?;
        for account in &self.accounts {
            account
                .validate()
                .map_err(|e| BudgetError::invalid_record(account.id, e))?;
        }
        for category in &self.categories {
            category
                .validate()
                .map_err(|e| BudgetError::invalid_record(category.id, e))?;
        }
        for dependent in &self.dependents {
            dependent
                .validate()
                .map_err(|e| BudgetError::invalid_record(dependent.id, e))?;
        }
        Ok(())
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Household::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_snapshot() {
        let snapshot = Snapshot::starter("Alice", "Bob");

        assert_eq!(snapshot.household.user1.name, "Alice");
        assert_eq!(snapshot.categories.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(snapshot.accounts.len(), 3);
        assert_eq!(
            snapshot.accounts.iter().filter(|a| a.owner.is_joint()).count(),
            1
        );
        assert!(snapshot.expenses.is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(Snapshot::starter("Alice", "Bob").validate().is_ok());
        assert!(matches!(
            Snapshot::starter("Alice", " ").validate(),
            Err(BudgetError::Validation(_))
        ));

        let mut snapshot = Snapshot::starter("Alice", "Bob");
        snapshot.categories[0].color = "blue".into();
        assert!(matches!(
            snapshot.validate(),
            Err(BudgetError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let household = serde_json::to_value(Household::default()).unwrap();
        let json = serde_json::json!({ "household": household });

        let snapshot: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.schema_version, SCHEMA_VERSION);
        assert!(snapshot.recurring_charges.is_empty());
        assert!(snapshot.projects.is_empty());
        assert!(snapshot.dependents.is_empty());
        assert!(snapshot.allowances.is_empty());
    }
}
