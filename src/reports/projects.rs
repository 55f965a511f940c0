//! Savings projects report

use std::io::Write;

use rust_decimal::prelude::ToPrimitive;

use crate::display::report::{csv_amount, format_bar};
use crate::error::{BudgetError, BudgetResult};
use crate::models::PartnerRole;
use crate::services::project::{project_progress, ProjectProgress};
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct ProjectsReport {
    pub projects: Vec<ProjectProgress>,
    pub user1_name: String,
    pub user2_name: String,
    pub currency_symbol: String,
}

impl ProjectsReport {
    pub fn generate(storage: &Storage, currency_symbol: &str) -> Self {
        let data = &storage.data;
        Self {
            projects: project_progress(&data.projects, &data.household, &data.expenses),
            user1_name: data.household.user1.name.clone(),
            user2_name: data.household.user2.name.clone(),
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn format_terminal(&self) -> String {
        let symbol = &self.currency_symbol;
        let mut output = String::new();

        output.push_str("Savings Projects\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.projects.is_empty() {
            output.push_str("No savings projects.\n");
            return output;
        }

        for p in &self.projects {
            let pct = p.progress_percentage.to_f64().unwrap_or(0.0);
            output.push_str(&format!(
                "\n{}{}\n",
                p.name,
                if p.completed { " (completed)" } else { "" }
            ));
            output.push_str(&format!(
                "  {} {:>5.1}%  {} / {}\n",
                format_bar(pct, 100.0, 20),
                pct,
                p.current.format_with_symbol(symbol),
                p.target.format_with_symbol(symbol)
            ));
            output.push_str(&format!(
                "  {}: {}   {}: {}   Remaining: {}   Spent: {}\n",
                self.user1_name,
                p.contributed_by(PartnerRole::User1).format_with_symbol(symbol),
                self.user2_name,
                p.contributed_by(PartnerRole::User2).format_with_symbol(symbol),
                p.remaining.format_with_symbol(symbol),
                p.spent.format_with_symbol(symbol)
            ));
        }

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| BudgetError::Export(e.to_string());

        csv.write_record([
            "Project".to_string(),
            "Target".to_string(),
            "Current".to_string(),
            self.user1_name.clone(),
            self.user2_name.clone(),
            "Spent".to_string(),
            "Progress".to_string(),
            "Completed".to_string(),
        ])
        .map_err(export_err)?;
        for p in &self.projects {
            csv.write_record([
                p.name.clone(),
                csv_amount(p.target),
                csv_amount(p.current),
                csv_amount(p.contributed_by_user1),
                csv_amount(p.contributed_by_user2),
                csv_amount(p.spent),
                p.progress_percentage.to_string(),
                p.completed.to_string(),
            ])
            .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}
