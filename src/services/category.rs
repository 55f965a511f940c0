//! Category service
//!
//! Creating, renaming and deleting expense categories. A category that is
//! still referenced by an expense or a recurring charge cannot be deleted.

use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// How many records point at a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryUsage {
    pub expenses: usize,
    pub charges: usize,
}

impl CategoryUsage {
    pub fn is_unused(&self) -> bool {
        self.expenses == 0 && self.charges == 0
    }
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a mut Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create and persist a category
    pub fn create(
        &mut self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> BudgetResult<Category> {
        let name = name.trim();
        self.ensure_name_free(name, None)?;

        let mut category = Category::new(name);
        if let Some(color) = color {
            category.color = color.trim().to_string();
        }
        category.icon = icon.map(|i| i.trim().to_string());
        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.data.categories.push(category.clone());
        self.storage.save()?;

        info!(category = %category.id, "created category");
        Ok(category)
    }

    /// All categories with their usage, sorted by name
    pub fn list(&self) -> Vec<(&Category, CategoryUsage)> {
        let mut categories: Vec<_> = self
            .storage
            .data
            .categories
            .iter()
            .map(|c| (c, self.usage(c.id)))
            .collect();
        categories.sort_by_key(|(c, _)| c.name.to_lowercase());
        categories
    }

    pub fn usage(&self, id: CategoryId) -> CategoryUsage {
        let data = &self.storage.data;
        CategoryUsage {
            expenses: data.expenses.iter().filter(|e| e.category_id == id).count(),
            charges: data
                .recurring_charges
                .iter()
                .filter(|c| c.category_id == id)
                .count(),
        }
    }

    /// Change a category's name or color
    pub fn update(
        &mut self,
        query: &str,
        name: Option<&str>,
        color: Option<&str>,
    ) -> BudgetResult<Category> {
        let id = self.storage.find_category(query)?.id;
        if let Some(name) = name {
            self.ensure_name_free(name.trim(), Some(id))?;
        }

        let category = self
            .storage
            .data
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BudgetError::category_not_found(query))?;
        let mut updated = category.clone();
        if let Some(name) = name {
            updated.name = name.trim().to_string();
        }
        if let Some(color) = color {
            updated.color = color.trim().to_string();
        }
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        *category = updated.clone();
        self.storage.save()?;

        info!(category = %id, "updated category");
        Ok(updated)
    }

    /// Delete an unused category
    pub fn delete(&mut self, query: &str) -> BudgetResult<Category> {
        let category = self.storage.find_category(query)?;
        let id = category.id;
        let usage = self.usage(id);
        if !usage.is_unused() {
            return Err(BudgetError::Validation(format!(
                "Category '{}' is still used by {} expense(s) and {} recurring charge(s)",
                category.name, usage.expenses, usage.charges
            )));
        }

        let categories = &mut self.storage.data.categories;
        let index = categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| BudgetError::category_not_found(query))?;
        let removed = categories.remove(index);
        self.storage.save()?;

        info!(category = %removed.id, "deleted category");
        Ok(removed)
    }

    fn ensure_name_free(&self, name: &str, except: Option<CategoryId>) -> BudgetResult<()> {
        let taken = self
            .storage
            .data
            .categories
            .iter()
            .any(|c| Some(c.id) != except && c.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(BudgetError::Validation(format!(
                "A category named '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetPaths;
    use crate::models::{Money, RecurringCharge};
    use crate::models::category::DEFAULT_CATEGORIES;
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> Storage {
        Storage::initialize(
            BudgetPaths::with_base_dir(temp_dir.path().to_path_buf()),
            "Alice",
            "Bob",
        )
        .unwrap()
    }

    #[test]
    fn test_create_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        let mut service = CategoryService::new(&mut storage);

        let pets = service.create("  Pets ", Some("#A855F7"), Some("paw")).unwrap();
        assert_eq!(pets.name, "Pets");
        assert_eq!(pets.icon.as_deref(), Some("paw"));

        let listed = service.list();
        assert_eq!(listed.len(), DEFAULT_CATEGORIES.len() + 1);
        assert!(listed.iter().any(|(c, usage)| c.id == pets.id && usage.is_unused()));
        drop(service);

        assert!(storage.find_category("pets").is_ok());
    }

    #[test]
    fn test_duplicate_and_invalid_names() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        let mut service = CategoryService::new(&mut storage);

        assert!(matches!(
            service.create("housing", None, None),
            Err(BudgetError::Validation(_))
        ));
        assert!(matches!(
            service.create(" ", None, None),
            Err(BudgetError::Validation(_))
        ));
        assert!(matches!(
            service.create("Pets", Some("purple"), None),
            Err(BudgetError::Validation(_))
        ));
    }

    #[test]
    fn test_update() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        let mut service = CategoryService::new(&mut storage);

        let updated = service
            .update("leisure", Some("Going out"), Some("#000000"))
            .unwrap();
        assert_eq!(updated.name, "Going out");
        assert_eq!(updated.color, "#000000");

        assert!(matches!(
            service.update("going out", Some("Housing"), None),
            Err(BudgetError::Validation(_))
        ));
        // keeping its own name is fine
        assert!(service.update("going out", Some("GOING OUT"), None).is_ok());
    }

    #[test]
    fn test_delete_refuses_referenced_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        let housing = storage.find_category("housing").unwrap().id;
        storage.data.recurring_charges.push(RecurringCharge::monthly(
            "Rent",
            Money::from_units(1200),
            housing,
        ));

        let mut service = CategoryService::new(&mut storage);
        let err = service.delete("housing").unwrap_err();
        assert!(err.to_string().contains("1 recurring charge"));

        let removed = service.delete("health").unwrap();
        assert_eq!(removed.name, "Health");
        assert!(service.delete("health").unwrap_err().is_not_found());
        drop(service);

        assert!(storage.find_category("housing").is_ok());
    }
}
