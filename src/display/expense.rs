//! Expense and recurring charge listings

use super::report::truncate;
use crate::config::Settings;
use crate::models::{Expense, RecurringCharge};
use crate::storage::Storage;

fn payer_name(storage: &Storage, expense: &Expense) -> String {
    let household = &storage.data.household;
    household
        .role_of(expense.payer_id)
        .map(|role| household.partner(role).name.clone())
        .unwrap_or_else(|| expense.payer_id.to_string())
}

fn account_name(storage: &Storage, expense: &Expense) -> String {
    storage
        .data
        .accounts
        .iter()
        .find(|a| a.id == expense.account_id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| expense.account_id.to_string())
}

/// One register row per expense
pub fn format_expense_list(expenses: &[&Expense], storage: &Storage, settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:22} {:>12} {:10} {:9} {:14} {:10}\n",
        "ID", "Date", "Label", "Amount", "Frequency", "Split", "Account", "Paid by"
    ));
    output.push_str(&"-".repeat(106));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format!(
            "{:12} {:10} {:22} {:>12} {:10} {:9} {:14} {:10}\n",
            expense.id.to_string(),
            expense.date.format(&settings.date_format).to_string(),
            truncate(&expense.label, 22),
            expense.amount.format_with_symbol(&settings.currency_symbol),
            expense.frequency.as_str(),
            expense.split_type.as_str(),
            truncate(&account_name(storage, expense), 14),
            truncate(&payer_name(storage, expense), 10),
        ));
    }

    output
}

/// One row per recurring charge, with its monthly weight
pub fn format_charge_list(charges: &[&RecurringCharge], storage: &Storage, symbol: &str) -> String {
    if charges.is_empty() {
        return "No recurring charges.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:24} {:>12} {:10} {:>12} {:16} {}\n",
        "ID", "Name", "Amount", "Frequency", "Monthly", "Category", "Active"
    ));
    output.push_str(&"-".repeat(98));
    output.push('\n');

    for charge in charges {
        output.push_str(&format!(
            "{:12} {:24} {:>12} {:10} {:>12} {:16} {}\n",
            charge.id.to_string(),
            truncate(&charge.name, 24),
            charge.amount.format_with_symbol(symbol),
            charge.frequency.as_str(),
            charge
                .frequency
                .monthly_equivalent(charge.amount)
                .format_with_symbol(symbol),
            truncate(&storage.category_name(charge.category_id), 16),
            if charge.active { "yes" } else { "no" },
        ));
    }

    output
}
