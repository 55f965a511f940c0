//! Dependent allowance CLI commands

use chrono::Datelike;
use clap::Subcommand;

use super::{parse_amount, parse_date, parse_month};
use crate::config::Settings;
use crate::display::{format_allowance_status, format_purchase_list};
use crate::error::BudgetResult;
use crate::services::{ChildPurchaseInput, ChildService};
use crate::storage::Storage;

/// Dependent subcommands
#[derive(Subcommand, Debug)]
pub enum ChildCommands {
    /// Add a dependent with a monthly allowance
    Add {
        /// Name
        name: String,
        /// Allowance for months without their own
        #[arg(short, long)]
        allowance: Option<String>,
    },
    /// List dependents
    List,
    /// Record a purchase made by a dependent
    Spend {
        /// Dependent name or ID
        child: String,
        /// What was bought
        description: String,
        /// Amount paid
        amount: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Link for online purchases
        #[arg(long)]
        url: Option<String>,
        /// Notes
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List a dependent's purchases, newest first
    Purchases {
        /// Dependent name or ID
        child: String,
        /// Restrict to one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Delete a purchase
    DeletePurchase {
        /// Purchase ID (the short form shown by `purchases` works)
        id: String,
    },
    /// Set the allowance of one month
    Allowance {
        /// Dependent name or ID
        child: String,
        /// Month (YYYY-MM)
        month: String,
        /// Amount
        amount: String,
        /// Mark as an exceptional month
        #[arg(long)]
        exceptional: bool,
    },
    /// Allowance, spending and carryover for a month
    Status {
        /// Dependent name or ID
        child: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Carry what is left of a month into the next one
    Carryover {
        /// Dependent name or ID
        child: String,
        /// Month to carry from (YYYY-MM)
        month: String,
    },
}

/// Handle a dependent command
pub fn handle_child_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ChildCommands,
) -> BudgetResult<()> {
    let symbol = &settings.currency_symbol;
    let mut service = ChildService::new(storage);

    match cmd {
        ChildCommands::Add { name, allowance } => {
            let allowance = allowance.as_deref().map(parse_amount).transpose()?;
            let dependent = service.add_dependent(&name, allowance)?;
            println!("Added dependent: {}", dependent.name);
            if let Some(allowance) = dependent.default_allowance {
                println!("  Default allowance: {}", allowance.format_with_symbol(symbol));
            }
            println!("  ID: {}", dependent.id);
        }

        ChildCommands::List => {
            let dependents = service.dependents();
            if dependents.is_empty() {
                println!("No dependents.");
            }
            for dependent in dependents {
                let allowance = dependent
                    .default_allowance
                    .map(|a| a.format_with_symbol(symbol))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:12} {:20} {:>10}", dependent.id.to_string(), dependent.name, allowance);
            }
        }

        ChildCommands::Spend {
            child,
            description,
            amount,
            date,
            url,
            note,
        } => {
            let purchase = service.record_purchase(ChildPurchaseInput {
                dependent: child,
                description,
                amount: parse_amount(&amount)?,
                date: parse_date(date.as_deref())?,
                product_url: url,
                notes: note,
            })?;
            println!(
                "Recorded purchase: {} {}",
                purchase.description,
                purchase.amount.format_with_symbol(symbol)
            );
            println!("  ID: {}", purchase.id);
        }

        ChildCommands::Purchases { child, month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let purchases = service.purchases(&child, month)?;
            print!("{}", format_purchase_list(&purchases, settings));
        }

        ChildCommands::DeletePurchase { id } => {
            let removed = service.delete_purchase(&id)?;
            println!("Deleted purchase: {} ({})", removed.description, removed.id);
        }

        ChildCommands::Allowance {
            child,
            month,
            amount,
            exceptional,
        } => {
            let (year, month) = parse_month(&month)?;
            let allowance =
                service.set_allowance(&child, year, month, parse_amount(&amount)?, exceptional)?;
            println!(
                "Allowance for {}-{:02}: {} (+{} carried over)",
                allowance.year,
                allowance.month,
                allowance.amount.format_with_symbol(symbol),
                allowance.carryover.format_with_symbol(symbol)
            );
        }

        ChildCommands::Status { child, month } => {
            let (year, month) = match month {
                Some(month) => parse_month(&month)?,
                None => {
                    let today = chrono::Local::now().date_naive();
                    (today.year(), today.month())
                }
            };
            let status = service.status(&child, year, month)?;
            let name = &service.dependent(&child)?.name;
            print!("{}", format_allowance_status(name, &status, symbol));
        }

        ChildCommands::Carryover { child, month } => {
            let (year, month) = parse_month(&month)?;
            let target = service.apply_carryover(&child, year, month)?;
            println!(
                "Carried {} into {}-{:02} (available: {})",
                target.carryover.format_with_symbol(symbol),
                target.year,
                target.month,
                target.available().format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
