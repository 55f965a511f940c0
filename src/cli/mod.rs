//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer.

pub mod account;
pub mod category;
pub mod charge;
pub mod child;
pub mod expense;
pub mod partner;
pub mod project;
pub mod report;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use charge::{handle_charge_command, ChargeCommands};
pub use child::{handle_child_command, ChildCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use partner::{handle_partner_command, PartnerCommands};
pub use project::{handle_project_command, ProjectCommands};
pub use report::{
    handle_balance_report, handle_breakdown_report, handle_history_report,
    handle_projection_report, handle_projects_report, ReportArgs,
};

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;

/// Parse a user-typed amount ("1200", "29,99", "€12.50")
pub(crate) fn parse_amount(input: &str) -> BudgetResult<Money> {
    Money::parse(input).map_err(|e| {
        BudgetError::Validation(format!(
            "Invalid amount '{}': {}. Use a format like '1200' or '29.99'",
            input, e
        ))
    })
}

/// Parse `YYYY-MM-DD`, defaulting to today
pub(crate) fn parse_date(input: Option<&str>) -> BudgetResult<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse `YYYY-MM`
pub(crate) fn parse_month(input: &str) -> BudgetResult<(i32, u32)> {
    let invalid = || BudgetError::Validation(format!("Invalid month '{}'. Use YYYY-MM", input));
    let (year, month) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("29,99").unwrap(), Money::from_cents(2999));
        assert!(matches!(parse_amount("abc"), Err(BudgetError::Validation(_))));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2025-03-05")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
        );
        assert!(parse_date(Some("05/03/2025")).is_err());
        assert!(parse_date(None).is_ok());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-02").unwrap(), (2025, 2));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025").is_err());
    }
}
