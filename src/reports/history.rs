//! Monthly history
//!
//! Expenses grouped by the calendar month they were paid in.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use crate::display::report::{csv_amount, month_label, truncate};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, Expense, Money};
use crate::services::filter::ExpenseFilter;
use crate::storage::Storage;

/// One month of expenses
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyHistoryEntry {
    pub year: i32,
    pub month: u32,
    pub total: Money,
    pub count: usize,
    /// Category totals, largest first
    pub by_category: Vec<(CategoryId, Money)>,
    /// The month's expenses, most recent first
    pub items: Vec<Expense>,
}

impl MonthlyHistoryEntry {
    pub fn label(&self) -> String {
        month_label(self.year, self.month)
    }
}

/// Group expenses by (year, month), newest month first
///
/// Totals use recorded amounts. Fails on the first invalid expense.
pub fn compute_monthly_history(expenses: &[Expense]) -> BudgetResult<Vec<MonthlyHistoryEntry>> {
    let mut months: BTreeMap<(i32, u32), Vec<&Expense>> = BTreeMap::new();

    for expense in expenses {
        expense
            .validate()
            .map_err(|e| BudgetError::invalid_record(expense.id, e))?;
        months.entry(expense.month_key()).or_default().push(expense);
    }

    let history = months
        .into_iter()
        .rev()
        .map(|((year, month), mut items)| {
            items.sort_by(|a, b| {
                b.date
                    .cmp(&a.date)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            });

            let mut categories: HashMap<CategoryId, Money> = HashMap::new();
            for item in &items {
                *categories.entry(item.category_id).or_default() += item.amount;
            }
            let mut by_category: Vec<_> = categories.into_iter().collect();
            by_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            MonthlyHistoryEntry {
                year,
                month,
                total: items.iter().map(|e| e.amount).sum(),
                count: items.len(),
                by_category,
                items: items.into_iter().cloned().collect(),
            }
        })
        .collect();

    Ok(history)
}

/// Monthly history report
#[derive(Debug, Clone)]
pub struct MonthlyHistoryReport {
    pub months: Vec<MonthlyHistoryEntry>,
    pub category_names: HashMap<CategoryId, String>,
    pub currency_symbol: String,
    /// Whether to list each month's expenses
    pub show_items: bool,
}

impl MonthlyHistoryReport {
    pub fn generate(
        storage: &Storage,
        filter: &ExpenseFilter,
        currency_symbol: &str,
        limit: Option<usize>,
    ) -> BudgetResult<Self> {
        let expenses = filter.apply_owned(&storage.data.expenses);
        let mut months = compute_monthly_history(&expenses)?;
        if let Some(limit) = limit {
            months.truncate(limit);
        }

        let category_names = months
            .iter()
            .flat_map(|m| m.by_category.iter().map(|(id, _)| *id))
            .map(|id| (id, storage.category_name(id)))
            .collect();

        Ok(Self {
            months,
            category_names,
            currency_symbol: currency_symbol.to_string(),
            show_items: false,
        })
    }

    pub fn with_items(mut self, show_items: bool) -> Self {
        self.show_items = show_items;
        self
    }

    fn name(&self, id: &CategoryId) -> String {
        self.category_names
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    pub fn format_terminal(&self) -> String {
        let symbol = &self.currency_symbol;
        let mut output = String::new();

        output.push_str("Monthly History\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        for entry in &self.months {
            output.push_str(&format!(
                "\n{:<30} {:>14} ({} expenses)\n",
                entry.label(),
                entry.total.format_with_symbol(symbol),
                entry.count
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');

            for (category_id, amount) in &entry.by_category {
                output.push_str(&format!(
                    "  {:<28} {:>14}\n",
                    self.name(category_id),
                    amount.format_with_symbol(symbol)
                ));
            }

            if self.show_items {
                for item in &entry.items {
                    output.push_str(&format!(
                        "    {} {:<24} {:>12}\n",
                        item.date.format("%d"),
                        truncate(&item.label, 24),
                        item.amount.format_with_symbol(symbol)
                    ));
                }
            }
        }

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| BudgetError::Export(e.to_string());

        csv.write_record(["Year", "Month", "Category", "Amount", "Month Total", "Month Count"])
            .map_err(export_err)?;
        for entry in &self.months {
            for (category_id, amount) in &entry.by_category {
                csv.write_record([
                    entry.year.to_string(),
                    entry.month.to_string(),
                    self.name(category_id),
                    csv_amount(*amount),
                    csv_amount(entry.total),
                    entry.count.to_string(),
                ])
                .map_err(export_err)?;
            }
        }

        csv.flush()
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}
