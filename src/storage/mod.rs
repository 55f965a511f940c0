//! Storage layer for DuoBudget
//!
//! The whole household lives in one JSON snapshot that is loaded on open
//! and rewritten atomically on save. Lookups accept a name or a short id.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json_optional, read_json_required, write_json_atomic};
pub use snapshot::Snapshot;

use tracing::info;

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Account, AccountOwner, Category, CategoryId, ChildExpense, Dependent, Expense,
    RecurringCharge, SavingsProject,
};

/// Loaded snapshot plus where it came from
pub struct Storage {
    paths: BudgetPaths,
    pub data: Snapshot,
}

impl Storage {
    /// Load the snapshot, or start from an empty household if none exists
    pub fn open(paths: BudgetPaths) -> BudgetResult<Self> {
        let data: Snapshot = read_json_optional(paths.household_file())?.unwrap_or_default();
        data.validate()?;
        Ok(Self { paths, data })
    }

    /// Create the data directory and write a starter snapshot
    ///
    /// Refuses to overwrite an existing household.
    pub fn initialize(paths: BudgetPaths, user1: &str, user2: &str) -> BudgetResult<Self> {
        if paths.is_initialized() {
            return Err(BudgetError::Storage(format!(
                "A household already exists at {}",
                paths.household_file().display()
            )));
        }
        let data = Snapshot::starter(user1.trim(), user2.trim());
        data.validate()?;
        paths.ensure_directories()?;

        let storage = Self { data, paths };
        storage.save()?;
        info!(path = %storage.paths.household_file().display(), "initialized household");
        Ok(storage)
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Write the snapshot to disk
    pub fn save(&self) -> BudgetResult<()> {
        write_json_atomic(self.paths.household_file(), &self.data)
    }

    pub fn find_account(&self, query: &str) -> BudgetResult<&Account> {
        let by_name_or_id = resolve(
            &self.data.accounts,
            query,
            |a| a.name.as_str(),
            |a, q| a.id.matches_short(q),
            |a| a.id.to_string(),
        )?;
        if let Some(account) = by_name_or_id {
            return Ok(account);
        }
        // "joint", "user1", "user2" pick the first account with that owner
        query
            .parse::<AccountOwner>()
            .ok()
            .and_then(|owner| self.data.accounts.iter().find(|a| a.owner == owner))
            .ok_or_else(|| BudgetError::account_not_found(query))
    }

    pub fn find_category(&self, query: &str) -> BudgetResult<&Category> {
        resolve(
            &self.data.categories,
            query,
            |c| c.name.as_str(),
            |c, q| c.id.matches_short(q),
            |c| c.id.to_string(),
        )?
        .ok_or_else(|| BudgetError::category_not_found(query))
    }

    pub fn find_expense(&self, query: &str) -> BudgetResult<&Expense> {
        let matches: Vec<&Expense> = self
            .data
            .expenses
            .iter()
            .filter(|e| e.id.matches_short(query))
            .collect();
        match matches.as_slice() {
            [] => Err(BudgetError::expense_not_found(query)),
            [expense] => Ok(*expense),
            several => Err(BudgetError::ambiguous(
                query,
                several.iter().map(|e| e.id.to_string()),
            )),
        }
    }

    pub fn find_charge(&self, query: &str) -> BudgetResult<&RecurringCharge> {
        resolve(
            &self.data.recurring_charges,
            query,
            |c| c.name.as_str(),
            |c, q| c.id.matches_short(q),
            |c| c.id.to_string(),
        )?
        .ok_or_else(|| BudgetError::charge_not_found(query))
    }

    pub fn find_project(&self, query: &str) -> BudgetResult<&SavingsProject> {
        resolve(
            &self.data.projects,
            query,
            |p| p.name.as_str(),
            |p, q| p.id.matches_short(q),
            |p| p.id.to_string(),
        )?
        .ok_or_else(|| BudgetError::project_not_found(query))
    }

    pub fn find_dependent(&self, query: &str) -> BudgetResult<&Dependent> {
        resolve(
            &self.data.dependents,
            query,
            |d| d.name.as_str(),
            |d, q| d.id.matches_short(q),
            |d| d.id.to_string(),
        )?
        .ok_or_else(|| BudgetError::dependent_not_found(query))
    }

    pub fn find_child_expense(&self, query: &str) -> BudgetResult<&ChildExpense> {
        let matches: Vec<&ChildExpense> = self
            .data
            .child_expenses
            .iter()
            .filter(|e| e.id.matches_short(query))
            .collect();
        match matches.as_slice() {
            [] => Err(BudgetError::child_expense_not_found(query)),
            [expense] => Ok(*expense),
            several => Err(BudgetError::ambiguous(
                query,
                several.iter().map(|e| e.id.to_string()),
            )),
        }
    }

    /// Name of a category, or its id if it has been deleted
    pub fn category_name(&self, id: CategoryId) -> String {
        self.data
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Look a record up by name or id prefix
///
/// A case-insensitive name match wins. Otherwise the id prefix must match
/// exactly one record; a prefix shared by several records is an error.
fn resolve<'a, T>(
    records: &'a [T],
    query: &str,
    name: impl Fn(&T) -> &str,
    id_matches: impl Fn(&T, &str) -> bool,
    short_id: impl Fn(&T) -> String,
) -> BudgetResult<Option<&'a T>> {
    if let Some(record) = records
        .iter()
        .find(|r| name(*r).eq_ignore_ascii_case(query.trim()))
    {
        return Ok(Some(record));
    }

    let matches: Vec<&T> = records.iter().filter(|r| id_matches(*r, query)).collect();
    match matches.as_slice() {
        [] => Ok(None),
        [record] => Ok(Some(*record)),
        several => Err(BudgetError::ambiguous(query, several.iter().map(|r| short_id(*r)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp_dir: &TempDir) -> BudgetPaths {
        BudgetPaths::with_base_dir(temp_dir.path().to_path_buf())
    }

    #[test]
    fn test_open_without_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(paths(&temp_dir)).unwrap();

        assert!(!storage.is_initialized());
        assert!(storage.data.expenses.is_empty());
    }

    #[test]
    fn test_initialize_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::initialize(paths(&temp_dir), "Alice", "Bob").unwrap();
        assert!(storage.is_initialized());

        let reopened = Storage::open(paths(&temp_dir)).unwrap();
        assert_eq!(reopened.data.household, storage.data.household);
        assert_eq!(reopened.data.accounts.len(), 3);
    }

    #[test]
    fn test_initialize_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        Storage::initialize(paths(&temp_dir), "Alice", "Bob").unwrap();

        assert!(matches!(
            Storage::initialize(paths(&temp_dir), "Carol", "Dan"),
            Err(BudgetError::Storage(_))
        ));
    }

    #[test]
    fn test_lookups() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::initialize(paths(&temp_dir), "Alice", "Bob").unwrap();

        assert_eq!(storage.find_account("joint").unwrap().owner, AccountOwner::Joint);
        assert_eq!(
            storage.find_account("bob personal").unwrap().owner,
            AccountOwner::User2
        );
        assert_eq!(storage.find_category("housing").unwrap().name, "Housing");

        let err = storage.find_category("Pets").unwrap_err();
        assert!(err.is_not_found());
        assert!(storage.find_expense("exp-00000000").unwrap_err().is_not_found());
    }

    #[test]
    fn test_shared_id_prefix_is_ambiguous() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = Storage::initialize(paths(&temp_dir), "Alice", "Bob").unwrap();
        let category = storage.data.categories[0].id;
        let account = storage.data.accounts[0].id;
        let payer = storage.data.household.user1.id;
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        for (label, uuid) in [
            ("Bread", "a1000000-0000-4000-8000-000000000001"),
            ("Wine", "a2000000-0000-4000-8000-000000000002"),
        ] {
            let mut expense = Expense::new(
                label,
                crate::models::Money::from_units(5),
                date,
                category,
                account,
                payer,
            );
            expense.id = uuid.parse().unwrap();
            storage.data.expenses.push(expense);
        }

        let err = storage.find_expense("a").unwrap_err();
        assert!(matches!(err, BudgetError::Ambiguous { .. }));
        assert!(err.to_string().contains("exp-a1000000"));
        assert!(err.to_string().contains("exp-a2000000"));

        assert_eq!(storage.find_expense("a2").unwrap().label, "Wine");
        assert_eq!(storage.find_expense("exp-a1000000").unwrap().label, "Bread");
    }

    #[test]
    fn test_name_match_beats_id_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = Storage::open(paths(&temp_dir)).unwrap();
        let mut odd = Category::new("Cafe");
        odd.id = "cafe0000-0000-4000-8000-000000000000".parse().unwrap();
        storage.data.categories.push(odd.clone());
        let mut named = Category::new("Ca");
        named.id = "ca000000-0000-4000-8000-000000000000".parse().unwrap();
        storage.data.categories.push(named.clone());

        assert_eq!(storage.find_category("ca").unwrap().id, named.id);
        assert!(matches!(
            storage.find_category("cat-ca"),
            Err(BudgetError::Ambiguous { .. })
        ));
        assert_eq!(storage.find_category("cat-caf").unwrap().id, odd.id);
    }
}
