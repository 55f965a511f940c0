//! Balance report
//!
//! Who paid what, who should have paid what, and the resulting settlement.

use std::io::Write;

use crate::display::report::{csv_amount, double_separator, separator};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{IncomeRatio, Money, PartnerRole};
use crate::services::balance::{BalanceEngine, BalanceResult};
use crate::services::filter::ExpenseFilter;
use crate::services::ledger::Ledger;
use crate::storage::Storage;

/// Balance between the two partners over a set of expenses
#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub user1_name: String,
    pub user2_name: String,
    pub income_ratio: IncomeRatio,
    /// Sum of period costs, joint expenses included
    pub total_spent: Money,
    pub expense_count: usize,
    pub result: BalanceResult,
    pub currency_symbol: String,
}

impl BalanceReport {
    pub fn generate(
        storage: &Storage,
        filter: &ExpenseFilter,
        engine: &BalanceEngine,
        currency_symbol: &str,
    ) -> BudgetResult<Self> {
        let household = &storage.data.household;
        let ledger = Ledger::new(household, &storage.data.accounts);
        let agg = ledger.aggregate(filter.apply(&storage.data.expenses))?;

        Ok(Self {
            user1_name: household.user1.name.clone(),
            user2_name: household.user2.name.clone(),
            income_ratio: ledger.income_ratio(),
            total_spent: agg.total,
            expense_count: agg.record_count,
            result: engine.balance(&agg, household),
            currency_symbol: currency_symbol.to_string(),
        })
    }

    fn name(&self, role: PartnerRole) -> &str {
        match role {
            PartnerRole::User1 => &self.user1_name,
            PartnerRole::User2 => &self.user2_name,
        }
    }

    pub fn format_terminal(&self) -> String {
        let symbol = &self.currency_symbol;
        let r = &self.result;
        let mut output = String::new();

        output.push_str("Balance\n");
        output.push_str(&double_separator(52));
        output.push('\n');
        output.push_str(&format!(
            "Expenses: {}   Total: {}   Income split: {}\n\n",
            self.expense_count,
            self.total_spent.format_with_symbol(symbol),
            self.income_ratio
        ));

        output.push_str(&format!("{:<20} {:>15} {:>15}\n", "", "Paid", "Should pay"));
        output.push_str(&separator(52));
        output.push('\n');
        for (role, paid, should) in [
            (PartnerRole::User1, r.paid_by_user1, r.should_pay_user1),
            (PartnerRole::User2, r.paid_by_user2, r.should_pay_user2),
        ] {
            output.push_str(&format!(
                "{:<20} {:>15} {:>15}\n",
                self.name(role),
                paid.format_with_symbol(symbol),
                should.format_with_symbol(symbol)
            ));
        }
        output.push_str(&separator(52));
        output.push('\n');
        output.push_str(&format!(
            "Net balance: {}\n",
            r.net_balance.format_with_symbol(symbol)
        ));
        output.push_str(&r.statement);
        output.push('\n');

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| BudgetError::Export(e.to_string());
        let r = &self.result;

        csv.write_record(["Partner", "Paid", "Should Pay", "Difference"])
            .map_err(export_err)?;
        for (role, paid, should) in [
            (PartnerRole::User1, r.paid_by_user1, r.should_pay_user1),
            (PartnerRole::User2, r.paid_by_user2, r.should_pay_user2),
        ] {
            csv.write_record([
                self.name(role).to_string(),
                csv_amount(paid),
                csv_amount(should),
                csv_amount(should - paid),
            ])
            .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetPaths;
    use crate::models::{Expense, Frequency, SplitType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> Storage {
        let mut storage = Storage::initialize(
            BudgetPaths::with_base_dir(temp_dir.path().to_path_buf()),
            "Alice",
            "Bob",
        )
        .unwrap();
        storage.data.household.user1.salary = Money::from_units(2600);
        storage.data.household.user2.salary = Money::from_units(2400);

        let rent = Expense::new(
            "Rent",
            Money::from_units(1200),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            storage.data.categories[0].id,
            storage.data.accounts[1].id,
            storage.data.household.user1.id,
        )
        .with_frequency(Frequency::Monthly)
        .with_split(SplitType::Ratio);
        storage.data.expenses.push(rent);
        storage
    }

    #[test]
    fn test_balance_report() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        let report =
            BalanceReport::generate(&storage, &ExpenseFilter::new(), &BalanceEngine::default(), "€")
                .unwrap();

        assert_eq!(report.result.net_balance, Money::from_units(-576));
        let terminal = report.format_terminal();
        assert!(terminal.contains("Bob owes Alice €576.00"));
        assert!(terminal.contains("52% / 48%"));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.contains("Alice,1200.00,624.00,-576.00\n"));
        assert!(csv.contains("Bob,0.00,576.00,576.00\n"));
    }

    #[test]
    fn test_filter_narrows_balance() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let filter = ExpenseFilter::new().month(2025, 2);

        let report =
            BalanceReport::generate(&storage, &filter, &BalanceEngine::default(), "€").unwrap();
        assert_eq!(report.expense_count, 0);
        assert!(report.result.settlement.is_settled());
    }
}
