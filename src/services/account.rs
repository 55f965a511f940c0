//! Account service
//!
//! Accounts only carry an owner tag; deleting one that an expense was paid
//! from would leave that expense unresolvable, so it is refused.

use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, AccountId, AccountOwner};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a mut Storage,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create and persist an account
    pub fn create(&mut self, name: &str, owner: AccountOwner) -> BudgetResult<Account> {
        let name = name.trim();
        self.ensure_name_free(name, None)?;

        let account = Account::new(name, owner);
        account
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.data.accounts.push(account.clone());
        self.storage.save()?;

        info!(account = %account.id, owner = %account.owner, "created account");
        Ok(account)
    }

    /// All accounts with the number of expenses paid from each, joint first
    pub fn list(&self) -> Vec<(&Account, usize)> {
        let mut accounts: Vec<_> = self
            .storage
            .data
            .accounts
            .iter()
            .map(|a| (a, self.expense_count(a.id)))
            .collect();
        accounts.sort_by(|(a, _), (b, _)| {
            owner_rank(a.owner)
                .cmp(&owner_rank(b.owner))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        accounts
    }

    pub fn expense_count(&self, id: AccountId) -> usize {
        self.storage
            .data
            .expenses
            .iter()
            .filter(|e| e.account_id == id)
            .count()
    }

    pub fn rename(&mut self, query: &str, name: &str) -> BudgetResult<Account> {
        let id = self.storage.find_account(query)?.id;
        let name = name.trim();
        self.ensure_name_free(name, Some(id))?;

        let account = self
            .storage
            .data
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| BudgetError::account_not_found(query))?;
        let mut updated = account.clone();
        updated.name = name.to_string();
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        *account = updated.clone();
        self.storage.save()?;

        info!(account = %id, "renamed account");
        Ok(updated)
    }

    /// Delete an account no expense was paid from
    pub fn delete(&mut self, query: &str) -> BudgetResult<Account> {
        let account = self.storage.find_account(query)?;
        let id = account.id;
        let used_by = self.expense_count(id);
        if used_by > 0 {
            return Err(BudgetError::Validation(format!(
                "Account '{}' is still used by {} expense(s)",
                account.name, used_by
            )));
        }

        let accounts = &mut self.storage.data.accounts;
        let index = accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| BudgetError::account_not_found(query))?;
        let removed = accounts.remove(index);
        self.storage.save()?;

        info!(account = %removed.id, "deleted account");
        Ok(removed)
    }

    fn ensure_name_free(&self, name: &str, except: Option<AccountId>) -> BudgetResult<()> {
        let taken = self
            .storage
            .data
            .accounts
            .iter()
            .any(|a| Some(a.id) != except && a.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(BudgetError::Validation(format!(
                "An account named '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

fn owner_rank(owner: AccountOwner) -> u8 {
    match owner {
        AccountOwner::Joint => 0,
        AccountOwner::User1 => 1,
        AccountOwner::User2 => 2,
    }
}
