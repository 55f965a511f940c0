//! Recurring charge CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::format_charge_list;
use crate::error::BudgetResult;
use crate::models::Frequency;
use crate::services::ChargeService;
use crate::storage::Storage;

/// Recurring charge subcommands
#[derive(Subcommand, Debug)]
pub enum ChargeCommands {
    /// Add a recurring charge to the budget
    Add {
        /// Charge name (e.g., "Rent")
        name: String,
        /// Amount billed each period
        amount: String,
        /// monthly, quarterly or annual
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
    },
    /// List recurring charges
    List {
        /// Include paused charges
        #[arg(short, long)]
        all: bool,
    },
    /// Stop counting a charge in the projection
    Pause {
        /// Charge name or ID
        charge: String,
    },
    /// Count a paused charge again
    Resume {
        /// Charge name or ID
        charge: String,
    },
    /// Delete a recurring charge
    Delete {
        /// Charge name or ID
        charge: String,
    },
}

/// Handle a recurring charge command
pub fn handle_charge_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ChargeCommands,
) -> BudgetResult<()> {
    let symbol = &settings.currency_symbol;

    match cmd {
        ChargeCommands::Add {
            name,
            amount,
            frequency,
            category,
        } => {
            let amount = parse_amount(&amount)?;
            let frequency: Frequency = frequency.parse()?;
            let charge = ChargeService::new(storage).create(&name, amount, frequency, &category)?;

            println!("Added recurring charge: {}", charge.name);
            println!(
                "  {} {} = {} per month",
                charge.amount.format_with_symbol(symbol),
                charge.frequency.label().to_lowercase(),
                charge
                    .frequency
                    .monthly_equivalent(charge.amount)
                    .format_with_symbol(symbol)
            );
            println!("  ID: {}", charge.id);
        }

        ChargeCommands::List { all } => {
            let charges: Vec<_> = ChargeService::new(storage)
                .list(all)
                .into_iter()
                .cloned()
                .collect();
            let shown: Vec<_> = charges.iter().collect();
            print!("{}", format_charge_list(&shown, storage, symbol));
        }

        ChargeCommands::Pause { charge } => {
            let charge = ChargeService::new(storage).set_active(&charge, false)?;
            println!("Paused: {}", charge.name);
        }

        ChargeCommands::Resume { charge } => {
            let charge = ChargeService::new(storage).set_active(&charge, true)?;
            println!("Resumed: {}", charge.name);
        }

        ChargeCommands::Delete { charge } => {
            let removed = ChargeService::new(storage).delete(&charge)?;
            println!("Deleted recurring charge: {}", removed.name);
        }
    }

    Ok(())
}
