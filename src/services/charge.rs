//! Recurring charge service

use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Frequency, Money, RecurringCharge};
use crate::storage::Storage;

/// Service for recurring charge management
pub struct ChargeService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ChargeService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create and persist a recurring charge
    pub fn create(
        &mut self,
        name: &str,
        amount: Money,
        frequency: Frequency,
        category: &str,
    ) -> BudgetResult<RecurringCharge> {
        if self.storage.find_charge(name).is_ok() {
            return Err(BudgetError::Validation(format!(
                "A recurring charge named '{}' already exists",
                name.trim()
            )));
        }

        let category_id = self.storage.find_category(category)?.id;
        let charge = RecurringCharge::new(name.trim(), amount, frequency, category_id);
        charge
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.data.recurring_charges.push(charge.clone());
        self.storage.save()?;

        info!(charge = %charge.id, "added recurring charge");
        Ok(charge)
    }

    /// All charges, largest monthly weight first
    pub fn list(&self, include_inactive: bool) -> Vec<&RecurringCharge> {
        let mut charges: Vec<_> = self
            .storage
            .data
            .recurring_charges
            .iter()
            .filter(|c| include_inactive || c.active)
            .collect();
        charges.sort_by(|a, b| {
            b.frequency
                .monthly_equivalent(b.amount)
                .cmp(&a.frequency.monthly_equivalent(a.amount))
                .then_with(|| a.name.cmp(&b.name))
        });
        charges
    }

    /// Pause or resume a charge
    pub fn set_active(&mut self, query: &str, active: bool) -> BudgetResult<RecurringCharge> {
        let id = self.storage.find_charge(query)?.id;
        let charge = self
            .storage
            .data
            .recurring_charges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BudgetError::charge_not_found(query))?;

        if active {
            charge.activate();
        } else {
            charge.deactivate();
        }
        let updated = charge.clone();
        self.storage.save()?;
        Ok(updated)
    }

    /// Delete a charge by name or short id
    pub fn delete(&mut self, query: &str) -> BudgetResult<RecurringCharge> {
        let id = self.storage.find_charge(query)?.id;
        let charges = &mut self.storage.data.recurring_charges;
        let index = charges
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| BudgetError::charge_not_found(query))?;
        let removed = charges.remove(index);
        self.storage.save()?;

        info!(charge = %removed.id, "deleted recurring charge");
        Ok(removed)
    }
}
