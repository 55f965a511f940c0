//! Dependent purchases and allowance status

use super::report::{month_label, truncate};
use crate::config::Settings;
use crate::models::ChildExpense;
use crate::services::AllowanceStatus;

/// One row per purchase
pub fn format_purchase_list(purchases: &[&ChildExpense], settings: &Settings) -> String {
    if purchases.is_empty() {
        return "No purchases found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:30} {:>10}\n",
        "ID", "Date", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(65));
    output.push('\n');

    for purchase in purchases {
        output.push_str(&format!(
            "{:12} {:10} {:30} {:>10}\n",
            purchase.id.to_string(),
            purchase.date.format(&settings.date_format).to_string(),
            truncate(&purchase.description, 30),
            purchase.amount.format_with_symbol(&settings.currency_symbol),
        ));
    }

    output
}

/// Month summary for one dependent
pub fn format_allowance_status(name: &str, status: &AllowanceStatus, symbol: &str) -> String {
    let mut output = format!("{} - {}\n", name, month_label(status.year, status.month));
    if status.is_exceptional {
        output.push_str("  (exceptional month)\n");
    }

    let Some(allowance) = status.allowance else {
        output.push_str("  No allowance set for this month\n");
        output.push_str(&format!(
            "  Spent:     {} ({} purchases)\n",
            status.spent.format_with_symbol(symbol),
            status.expense_count
        ));
        return output;
    };

    output.push_str(&format!("  Allowance: {}\n", allowance.format_with_symbol(symbol)));
    output.push_str(&format!("  Carryover: {}\n", status.carryover.format_with_symbol(symbol)));
    if let Some(available) = status.available {
        output.push_str(&format!("  Available: {}\n", available.format_with_symbol(symbol)));
    }
    output.push_str(&format!(
        "  Spent:     {} ({} purchases)\n",
        status.spent.format_with_symbol(symbol),
        status.expense_count
    ));
    if let Some(remaining) = status.remaining {
        output.push_str(&format!(
            "  Remaining: {}{}\n",
            remaining.format_with_symbol(symbol),
            if status.is_overspent() { " (overspent)" } else { "" }
        ));
    }
    output.push_str(&format!(
        "  Carries to next month: {}\n",
        status.carryover_to_next.format_with_symbol(symbol)
    ));

    output
}
