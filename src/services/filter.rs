//! Expense filtering
//!
//! Narrows an expense list before it is aggregated or reported.

use chrono::NaiveDate;

use crate::models::{
    AccountId, CategoryId, Expense, Frequency, Money, ProjectId, SplitType, UserId,
};

/// Criteria an expense must meet; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Inclusive start date
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date
    pub end_date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    pub account_id: Option<AccountId>,
    pub payer_id: Option<UserId>,
    pub project_id: Option<ProjectId>,
    pub frequency: Option<Frequency>,
    pub split_type: Option<SplitType>,
    pub recurring: Option<bool>,
    /// Case-insensitive substring of the label
    pub label_contains: Option<String>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Restrict to one calendar month
    pub fn month(self, year: i32, month: u32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, month, 1);
        let end = start.and_then(|s| {
            s.checked_add_months(chrono::Months::new(1))
                .and_then(|next| next.pred_opt())
        });
        match (start, end) {
            (Some(start), Some(end)) => self.date_range(start, end),
            _ => self,
        }
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn payer(mut self, payer_id: UserId) -> Self {
        self.payer_id = Some(payer_id);
        self
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn split(mut self, split_type: SplitType) -> Self {
        self.split_type = Some(split_type);
        self
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = Some(recurring);
        self
    }

    pub fn label(mut self, needle: impl Into<String>) -> Self {
        self.label_contains = Some(needle.into());
        self
    }

    pub fn amount_between(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Check if an expense matches this filter
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(start) = self.start_date {
            if expense.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if expense.date > end {
                return false;
            }
        }

        if self.category_id.is_some_and(|id| expense.category_id != id)
            || self.account_id.is_some_and(|id| expense.account_id != id)
            || self.payer_id.is_some_and(|id| expense.payer_id != id)
            || self.frequency.is_some_and(|f| expense.frequency != f)
            || self.split_type.is_some_and(|s| expense.split_type != s)
            || self.recurring.is_some_and(|r| expense.is_recurring != r)
        {
            return false;
        }

        if let Some(project_id) = self.project_id {
            if expense.project_id != Some(project_id) {
                return false;
            }
        }

        if let Some(ref needle) = self.label_contains {
            if !expense.label.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if let Some(min) = self.min_amount {
            if expense.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if expense.amount > max {
                return false;
            }
        }

        true
    }

    /// Borrow the matching expenses, preserving order
    pub fn apply<'e>(&self, expenses: &'e [Expense]) -> Vec<&'e Expense> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }

    /// Clone the matching expenses, preserving order
    pub fn apply_owned(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(label: &str, amount: i64, month: u32, day: u32) -> Expense {
        Expense::new(
            label,
            Money::from_units(amount),
            NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
            CategoryId::new(),
            AccountId::new(),
            UserId::new(),
        )
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let expenses = vec![expense("Rent", 1200, 1, 1), expense("Bread", 3, 2, 9)];
        assert_eq!(ExpenseFilter::new().apply(&expenses).len(), 2);
    }

    #[test]
    fn test_month_filter() {
        let expenses = vec![
            expense("Jan", 10, 1, 31),
            expense("Feb first", 10, 2, 1),
            expense("Feb last", 10, 2, 28),
            expense("Mar", 10, 3, 1),
        ];
        let february = ExpenseFilter::new().month(2025, 2).apply(&expenses);
        let labels: Vec<_> = february.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Feb first", "Feb last"]);
    }

    #[test]
    fn test_field_filters() {
        let rent = expense("Rent", 1200, 1, 1)
            .with_frequency(Frequency::Monthly)
            .with_split(SplitType::Ratio);
        let groceries = expense("Groceries", 85, 1, 12);
        let expenses = vec![rent.clone(), groceries.clone()];

        let by_category = ExpenseFilter::new().category(rent.category_id).apply(&expenses);
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, rent.id);

        let recurring = ExpenseFilter::new().recurring(true).apply(&expenses);
        assert_eq!(recurring[0].id, rent.id);

        let ratio = ExpenseFilter::new().split(SplitType::Ratio).apply(&expenses);
        assert_eq!(ratio.len(), 1);

        let by_payer = ExpenseFilter::new().payer(groceries.payer_id).apply(&expenses);
        assert_eq!(by_payer[0].id, groceries.id);

        let by_label = ExpenseFilter::new().label("GROC").apply(&expenses);
        assert_eq!(by_label[0].id, groceries.id);
    }

    #[test]
    fn test_amount_and_project_filters() {
        let project = ProjectId::new();
        let tagged = expense("Flights", 400, 5, 2).with_project(project);
        let expenses = vec![tagged.clone(), expense("Coffee", 4, 5, 3)];

        let big = ExpenseFilter::new()
            .amount_between(Some(Money::from_units(100)), None)
            .apply_owned(&expenses);
        assert_eq!(big.len(), 1);
        assert_eq!(big[0].id, tagged.id);

        let small = ExpenseFilter::new()
            .amount_between(None, Some(Money::from_units(4)))
            .apply(&expenses);
        assert_eq!(small[0].label, "Coffee");

        let in_project = ExpenseFilter::new().project(project).apply(&expenses);
        assert_eq!(in_project.len(), 1);
    }
}
