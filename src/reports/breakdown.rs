//! Category breakdown
//!
//! Sum and count of expenses per category, at their recorded amounts.

use std::collections::HashMap;
use std::io::Write;

use crate::display::report::{csv_amount, format_bar, format_percentage, percentage_of};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, Expense, Money};
use crate::services::filter::ExpenseFilter;
use crate::storage::Storage;

/// Totals for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub total: Money,
    pub count: usize,
}

/// Group expenses by category, largest total first
///
/// Amounts are summed as recorded, whatever their frequency. Fails on the
/// first invalid expense.
pub fn compute_category_breakdown(expenses: &[Expense]) -> BudgetResult<Vec<CategoryTotal>> {
    let mut totals: HashMap<CategoryId, (Money, usize)> = HashMap::new();

    for expense in expenses {
        expense
            .validate()
            .map_err(|e| BudgetError::invalid_record(expense.id, e))?;
        let entry = totals.entry(expense.category_id).or_default();
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category_id, (total, count))| CategoryTotal {
            category_id,
            total,
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category_id.cmp(&b.category_id))
    });

    Ok(breakdown)
}

/// A category row with its name and share
#[derive(Debug, Clone)]
pub struct CategoryBreakdownRow {
    pub category_id: CategoryId,
    pub category_name: String,
    pub total: Money,
    pub count: usize,
    pub percentage: f64,
}

/// Category breakdown report
#[derive(Debug, Clone)]
pub struct CategoryBreakdownReport {
    pub rows: Vec<CategoryBreakdownRow>,
    pub total: Money,
    pub expense_count: usize,
    pub currency_symbol: String,
}

impl CategoryBreakdownReport {
    pub fn generate(
        storage: &Storage,
        filter: &ExpenseFilter,
        currency_symbol: &str,
    ) -> BudgetResult<Self> {
        let expenses = filter.apply_owned(&storage.data.expenses);
        let breakdown = compute_category_breakdown(&expenses)?;
        let total: Money = breakdown.iter().map(|c| c.total).sum();

        let rows = breakdown
            .into_iter()
            .map(|c| CategoryBreakdownRow {
                category_name: storage.category_name(c.category_id),
                percentage: percentage_of(c.total, total),
                category_id: c.category_id,
                total: c.total,
                count: c.count,
            })
            .collect();

        Ok(Self {
            rows,
            total,
            expense_count: expenses.len(),
            currency_symbol: currency_symbol.to_string(),
        })
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:>12} {:>6} {:>7}  {}\n",
            "Category", "Amount", "Count", "%", ""
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        let max = self.rows.first().map(|r| r.total.to_f64()).unwrap_or(0.0);
        for row in &self.rows {
            output.push_str(&format!(
                "{:<22} {:>12} {:>6} {:>7}  {}\n",
                row.category_name,
                row.total.format_with_symbol(&self.currency_symbol),
                row.count,
                format_percentage(row.percentage),
                format_bar(row.total.to_f64(), max, 20)
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>12} {:>6}\n",
            "TOTAL",
            self.total.format_with_symbol(&self.currency_symbol),
            self.expense_count
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| BudgetError::Export(e.to_string());

        csv.write_record(["Category", "Amount", "Count", "Percentage"])
            .map_err(export_err)?;
        for row in &self.rows {
            csv.write_record([
                row.category_name.clone(),
                csv_amount(row.total),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
            ])
            .map_err(export_err)?;
        }
        csv.write_record([
            "TOTAL".to_string(),
            csv_amount(self.total),
            self.expense_count.to_string(),
            "100.00".to_string(),
        ])
        .map_err(export_err)?;

        csv.flush()
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}
