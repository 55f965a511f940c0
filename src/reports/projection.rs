//! Budget projection report

use std::io::Write;

use crate::display::report::{csv_amount, format_percentage, percentage_of, truncate};
use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;
use crate::services::projection::{compute_monthly_projection, BudgetSummary};
use crate::storage::Storage;

/// Monthly and annual forecast of the recurring charges
#[derive(Debug, Clone)]
pub struct ProjectionReport {
    pub summary: BudgetSummary,
    /// (category name, monthly amount), largest first
    pub categories: Vec<(String, Money)>,
    pub currency_symbol: String,
}

impl ProjectionReport {
    pub fn generate(storage: &Storage, currency_symbol: &str) -> BudgetResult<Self> {
        let summary = compute_monthly_projection(&storage.data.recurring_charges)?;
        let categories = summary
            .ranked_categories()
            .into_iter()
            .map(|(id, amount)| (storage.category_name(id), amount))
            .collect();

        Ok(Self {
            summary,
            categories,
            currency_symbol: currency_symbol.to_string(),
        })
    }

    pub fn format_terminal(&self) -> String {
        let symbol = &self.currency_symbol;
        let s = &self.summary;
        let mut output = String::new();

        output.push_str("Recurring Budget Projection\n");
        output.push_str(&"=".repeat(64));
        output.push('\n');

        if s.is_empty() {
            output.push_str("No active recurring charges.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<26} {:>12} {:>10} {:>12}\n",
            "Charge", "Amount", "Frequency", "Monthly"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');
        for item in &s.items {
            output.push_str(&format!(
                "{:<26} {:>12} {:>10} {:>12}\n",
                truncate(&item.name, 26),
                item.amount.format_with_symbol(symbol),
                item.frequency.as_str(),
                item.monthly_amount.format_with_symbol(symbol)
            ));
        }

        output.push_str("\nBy category\n");
        output.push_str(&"-".repeat(64));
        output.push('\n');
        for (name, amount) in &self.categories {
            output.push_str(&format!(
                "{:<26} {:>12} {:>10}\n",
                truncate(name, 26),
                amount.format_with_symbol(symbol),
                format_percentage(percentage_of(*amount, s.total_monthly))
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "Monthly total: {}\nAnnual total:  {}\n",
            s.total_monthly.format_with_symbol(symbol),
            s.total_annual.format_with_symbol(symbol)
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| BudgetError::Export(e.to_string());

        csv.write_record(["Charge", "Amount", "Frequency", "Monthly"])
            .map_err(export_err)?;
        for item in &self.summary.items {
            csv.write_record([
                item.name.clone(),
                csv_amount(item.amount),
                item.frequency.as_str().to_string(),
                csv_amount(item.monthly_amount),
            ])
            .map_err(export_err)?;
        }
        csv.write_record([
            "TOTAL".to_string(),
            String::new(),
            "annual".to_string(),
            csv_amount(self.summary.total_annual),
        ])
        .map_err(export_err)?;

        csv.flush()
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetPaths;
    use crate::models::RecurringCharge;
    use tempfile::TempDir;

    #[test]
    fn test_projection_report() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = Storage::initialize(
            BudgetPaths::with_base_dir(temp_dir.path().to_path_buf()),
            "Alice",
            "Bob",
        )
        .unwrap();
        let housing = storage.find_category("Housing").unwrap().id;
        let insurance = storage.find_category("Insurance").unwrap().id;
        storage.data.recurring_charges = vec![
            RecurringCharge::monthly("Rent", Money::from_units(1200), housing),
            RecurringCharge::annual("Home insurance", Money::from_units(600), insurance),
        ];

        let report = ProjectionReport::generate(&storage, "€").unwrap();
        assert_eq!(report.categories[0].0, "Housing");

        let terminal = report.format_terminal();
        assert!(terminal.contains("Monthly total: €1250.00"));
        assert!(terminal.contains("Annual total:  €15000.00"));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.contains("Home insurance,600.00,annual,50.00\n"));
        assert!(csv.contains("TOTAL,,annual,15000.00\n"));
    }
}
