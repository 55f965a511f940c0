//! Dependent allowances
//!
//! The month status is a pure fold over a dependent's purchases:
//! `remaining = allowance + carryover - spent`, and whatever stays positive
//! can be carried into the next month. `ChildService` adds persistence.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{BudgetError, BudgetResult};
use crate::models::child::next_month;
use crate::models::{ChildExpense, Dependent, DependentId, Money, MonthlyAllowance};
use crate::storage::Storage;

/// Where a dependent stands for one month
#[derive(Debug, Clone, PartialEq)]
pub struct AllowanceStatus {
    pub dependent_id: DependentId,
    pub year: i32,
    pub month: u32,
    /// The month's allowance, or the dependent's default; `None` if neither is set
    pub allowance: Option<Money>,
    pub carryover: Money,
    /// Allowance plus carryover
    pub available: Option<Money>,
    pub spent: Money,
    /// Negative when the dependent overspent
    pub remaining: Option<Money>,
    /// Positive part of `remaining`
    pub carryover_to_next: Money,
    pub is_exceptional: bool,
    pub expense_count: usize,
}

impl AllowanceStatus {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_some_and(|r| r.is_negative())
    }
}

/// Status of `dependent` for `(year, month)`
///
/// Fails on the first invalid purchase of that month.
pub fn compute_allowance_status(
    dependent: &Dependent,
    allowances: &[MonthlyAllowance],
    expenses: &[ChildExpense],
    year: i32,
    month: u32,
) -> BudgetResult<AllowanceStatus> {
    let record = allowances
        .iter()
        .find(|a| a.dependent_id == dependent.id && a.month_key() == (year, month));

    let mut spent = Money::zero();
    let mut expense_count = 0;
    for expense in expenses
        .iter()
        .filter(|e| e.dependent_id == dependent.id && e.month_key() == (year, month))
    {
        expense
            .validate()
            .map_err(|e| BudgetError::invalid_record(expense.id, e))?;
        spent += expense.amount;
        expense_count += 1;
    }

    let allowance = record.map(|r| r.amount).or(dependent.default_allowance);
    let carryover = record.map(|r| r.carryover).unwrap_or_default();
    let available = allowance.map(|a| a + carryover);
    let remaining = available.map(|a| a - spent);
    let carryover_to_next = remaining
        .filter(|r| r.is_positive())
        .unwrap_or_default();

    debug!(
        dependent = %dependent.id,
        year,
        month,
        spent = %spent,
        carryover_to_next = %carryover_to_next,
        "computed allowance status"
    );

    Ok(AllowanceStatus {
        dependent_id: dependent.id,
        year,
        month,
        allowance,
        carryover,
        available,
        spent,
        remaining,
        carryover_to_next,
        is_exceptional: record.is_some_and(|r| r.is_exceptional),
        expense_count,
    })
}

/// Unspent allowance of `(year, month)`, never negative
pub fn calculate_carryover(
    dependent: &Dependent,
    allowances: &[MonthlyAllowance],
    expenses: &[ChildExpense],
    year: i32,
    month: u32,
) -> BudgetResult<Money> {
    compute_allowance_status(dependent, allowances, expenses, year, month)
        .map(|status| status.carryover_to_next)
}

/// Details of a new purchase
#[derive(Debug, Clone)]
pub struct ChildPurchaseInput {
    pub dependent: String,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub product_url: Option<String>,
    pub notes: Option<String>,
}

/// Service for dependents, their purchases and allowances
pub struct ChildService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ChildService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    pub fn add_dependent(
        &mut self,
        name: &str,
        default_allowance: Option<Money>,
    ) -> BudgetResult<Dependent> {
        let name = name.trim();
        if self
            .storage
            .data
            .dependents
            .iter()
            .any(|d| d.name.eq_ignore_ascii_case(name))
        {
            return Err(BudgetError::Validation(format!(
                "A dependent named '{}' already exists",
                name
            )));
        }

        let mut dependent = Dependent::new(name);
        dependent.default_allowance = default_allowance;
        dependent
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.data.dependents.push(dependent.clone());
        self.storage.save()?;

        info!(dependent = %dependent.id, "added dependent");
        Ok(dependent)
    }

    pub fn dependents(&self) -> &[Dependent] {
        &self.storage.data.dependents
    }

    pub fn dependent(&self, query: &str) -> BudgetResult<&Dependent> {
        self.storage.find_dependent(query)
    }

    pub fn record_purchase(&mut self, input: ChildPurchaseInput) -> BudgetResult<ChildExpense> {
        let dependent_id = self.storage.find_dependent(&input.dependent)?.id;

        let mut expense =
            ChildExpense::new(dependent_id, input.description.trim(), input.amount, input.date);
        expense.product_url = input.product_url.filter(|u| !u.trim().is_empty());
        expense.notes = input.notes.unwrap_or_default();
        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.data.child_expenses.push(expense.clone());
        self.storage.save()?;

        info!(purchase = %expense.id, dependent = %dependent_id, "recorded purchase");
        Ok(expense)
    }

    /// A dependent's purchases, newest first, optionally for one month
    pub fn purchases(
        &self,
        dependent: &str,
        month: Option<(i32, u32)>,
    ) -> BudgetResult<Vec<&ChildExpense>> {
        let dependent_id = self.storage.find_dependent(dependent)?.id;
        let mut purchases: Vec<_> = self
            .storage
            .data
            .child_expenses
            .iter()
            .filter(|e| e.dependent_id == dependent_id)
            .filter(|e| month.map_or(true, |m| e.month_key() == m))
            .collect();
        purchases.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(purchases)
    }

    pub fn delete_purchase(&mut self, query: &str) -> BudgetResult<ChildExpense> {
        let id = self.storage.find_child_expense(query)?.id;
        let expenses = &mut self.storage.data.child_expenses;
        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| BudgetError::child_expense_not_found(query))?;
        let removed = expenses.remove(index);
        self.storage.save()?;

        info!(purchase = %removed.id, "deleted purchase");
        Ok(removed)
    }

    /// Set the allowance of one month, keeping any carryover already applied
    pub fn set_allowance(
        &mut self,
        dependent: &str,
        year: i32,
        month: u32,
        amount: Money,
        is_exceptional: bool,
    ) -> BudgetResult<MonthlyAllowance> {
        let dependent_id = self.storage.find_dependent(dependent)?.id;

        let mut allowance = self
            .find_allowance(dependent_id, year, month)
            .cloned()
            .unwrap_or_else(|| MonthlyAllowance::new(dependent_id, year, month, amount));
        allowance.amount = amount;
        allowance.is_exceptional = is_exceptional;
        allowance
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.upsert_allowance(allowance.clone());
        self.storage.save()?;

        info!(dependent = %dependent_id, year, month, amount = %amount, "set allowance");
        Ok(allowance)
    }

    pub fn status(&self, dependent: &str, year: i32, month: u32) -> BudgetResult<AllowanceStatus> {
        let dependent = self.storage.find_dependent(dependent)?;
        let data = &self.storage.data;
        compute_allowance_status(dependent, &data.allowances, &data.child_expenses, year, month)
    }

    /// Carry what is left of `(year, month)` into the following month
    ///
    /// The source month needs an allowance. The target month gets one from
    /// the dependent's default if it has none yet. Applying twice overwrites
    /// the carryover rather than adding to it.
    pub fn apply_carryover(
        &mut self,
        dependent: &str,
        year: i32,
        month: u32,
    ) -> BudgetResult<MonthlyAllowance> {
        let source = self.status(dependent, year, month)?;
        if source.allowance.is_none() {
            return Err(BudgetError::Validation(format!(
                "No allowance set for {}-{:02}",
                year, month
            )));
        }

        let dependent = self.storage.find_dependent(dependent)?.clone();
        let (to_year, to_month) = next_month(year, month);
        let mut target = match self.find_allowance(dependent.id, to_year, to_month) {
            Some(existing) => existing.clone(),
            None => {
                let amount = dependent.default_allowance.ok_or_else(|| {
                    BudgetError::Validation(format!(
                        "No allowance set for {}-{:02}; set one before carrying over",
                        to_year, to_month
                    ))
                })?;
                MonthlyAllowance::new(dependent.id, to_year, to_month, amount)
            }
        };
        target.carryover = source.carryover_to_next;
        target
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.upsert_allowance(target.clone());
        self.storage.save()?;

        info!(
            dependent = %dependent.id,
            year,
            month,
            amount = %target.carryover,
            "applied carryover"
        );
        Ok(target)
    }

    fn find_allowance(
        &self,
        dependent_id: DependentId,
        year: i32,
        month: u32,
    ) -> Option<&MonthlyAllowance> {
        self.storage
            .data
            .allowances
            .iter()
            .find(|a| a.dependent_id == dependent_id && a.month_key() == (year, month))
    }

    fn upsert_allowance(&mut self, allowance: MonthlyAllowance) {
        let allowances = &mut self.storage.data.allowances;
        match allowances.iter_mut().find(|a| {
            a.dependent_id == allowance.dependent_id && a.month_key() == allowance.month_key()
        }) {
            Some(existing) => *existing = allowance,
            None => allowances.push(allowance),
        }
    }
}
