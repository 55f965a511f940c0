//! Expense service
//!
//! Record-keeping on top of the snapshot: creating, listing and deleting
//! expenses with their references checked.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, Frequency, Money, SplitType};
use crate::services::filter::ExpenseFilter;
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a mut Storage,
}

/// Input for creating a new expense, with references given as user text
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub label: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: String,
    pub account: String,
    /// Partner name, short id, or `user1`/`user2`
    pub payer: String,
    pub frequency: Frequency,
    pub split_type: SplitType,
    pub project: Option<String>,
    pub description: Option<String>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create and persist an expense
    pub fn create(&mut self, input: CreateExpenseInput) -> BudgetResult<Expense> {
        let category_id = self.storage.find_category(&input.category)?.id;
        let account_id = self.storage.find_account(&input.account)?.id;
        let household = &self.storage.data.household;
        let payer = household
            .find(&input.payer)
            .ok_or_else(|| BudgetError::partner_not_found(input.payer.clone()))?;
        let payer_id = household.partner(payer).id;

        let mut expense = Expense::new(
            input.label.trim(),
            input.amount,
            input.date,
            category_id,
            account_id,
            payer_id,
        )
        .with_frequency(input.frequency)
        .with_split(input.split_type);

        if let Some(project) = input.project {
            expense = expense.with_project(self.storage.find_project(&project)?.id);
        }
        if let Some(description) = input.description {
            expense = expense.with_description(description);
        }

        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.data.expenses.push(expense.clone());
        self.storage.save()?;

        info!(expense = %expense.id, amount = %expense.amount, "added expense");
        Ok(expense)
    }

    /// Matching expenses, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        let mut expenses = filter.apply(&self.storage.data.expenses);
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        expenses
    }

    /// Change the amount and/or split policy of an existing expense
    pub fn update(
        &mut self,
        query: &str,
        amount: Option<Money>,
        split_type: Option<SplitType>,
    ) -> BudgetResult<Expense> {
        let id = self.storage.find_expense(query)?.id;
        let expense = self
            .storage
            .data
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| BudgetError::expense_not_found(query))?;

        let mut updated = expense.clone();
        if let Some(amount) = amount {
            updated.set_amount(amount);
        }
        if let Some(split_type) = split_type {
            updated.set_split(split_type);
        }
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        *expense = updated.clone();
        self.storage.save()?;

        info!(expense = %updated.id, "updated expense");
        Ok(updated)
    }

    /// Delete an expense by short id
    pub fn delete(&mut self, query: &str) -> BudgetResult<Expense> {
        let id = self.storage.find_expense(query)?.id;
        let expenses = &mut self.storage.data.expenses;
        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| BudgetError::expense_not_found(query))?;
        let removed = expenses.remove(index);
        self.storage.save()?;

        info!(expense = %removed.id, "deleted expense");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetPaths;
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> Storage {
        Storage::initialize(
            BudgetPaths::with_base_dir(temp_dir.path().to_path_buf()),
            "Alice",
            "Bob",
        )
        .unwrap()
    }

    fn input(amount: i64) -> CreateExpenseInput {
        CreateExpenseInput {
            label: "Groceries".into(),
            amount: Money::from_units(amount),
            date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            category: "groceries".into(),
            account: "alice personal".into(),
            payer: "alice".into(),
            frequency: Frequency::OneTime,
            split_type: SplitType::Equal,
            project: None,
            description: None,
        }
    }

    #[test]
    fn test_create_persists() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);

        let expense = ExpenseService::new(&mut storage).create(input(85)).unwrap();
        assert_eq!(expense.payer_id, storage.data.household.user1.id);

        let reopened = Storage::open(storage.paths().clone()).unwrap();
        assert_eq!(reopened.data.expenses.len(), 1);
        assert_eq!(reopened.data.expenses[0].id, expense.id);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        let mut service = ExpenseService::new(&mut storage);

        assert!(matches!(
            service.create(input(0)),
            Err(BudgetError::Validation(_))
        ));

        let mut unknown_payer = input(10);
        unknown_payer.payer = "carol".into();
        assert!(service.create(unknown_payer).unwrap_err().is_not_found());

        let mut unknown_category = input(10);
        unknown_category.category = "pets".into();
        assert!(service.create(unknown_category).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        let mut service = ExpenseService::new(&mut storage);

        let older = service.create(input(10)).unwrap();
        let mut later = input(20);
        later.date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let newer = service.create(later).unwrap();

        let listed: Vec<_> = service.list(&ExpenseFilter::new()).iter().map(|e| e.id).collect();
        assert_eq!(listed, vec![newer.id, older.id]);

        let edited = service
            .update(&newer.id.to_string(), Some(Money::from_units(30)), Some(SplitType::Ratio))
            .unwrap();
        assert_eq!(edited.amount, Money::from_units(30));
        assert_eq!(edited.split_type, SplitType::Ratio);
        assert!(service
            .update(&newer.id.to_string(), Some(Money::zero()), None)
            .is_err());
        assert_eq!(
            service.list(&ExpenseFilter::new())[0].amount,
            Money::from_units(30)
        );

        let removed = service.delete(&older.id.to_string()).unwrap();
        assert_eq!(removed.id, older.id);
        assert_eq!(service.list(&ExpenseFilter::new()).len(), 1);
        assert!(service.delete(&older.id.to_string()).is_err());
    }
}
