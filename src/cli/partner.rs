//! Partner CLI commands

use clap::Subcommand;
use tracing::info;

use super::parse_amount;
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::PartnerRole;
use crate::storage::Storage;

/// Partner subcommands
#[derive(Subcommand, Debug)]
pub enum PartnerCommands {
    /// Show both partners and the income ratio
    List,
    /// Set a partner's net monthly income
    SetSalary {
        /// Partner name, ID, "user1" or "user2"
        partner: String,
        /// Net monthly income
        amount: String,
    },
    /// Rename a partner
    Rename {
        /// Partner name, ID, "user1" or "user2"
        partner: String,
        /// New name
        name: String,
    },
}

/// Handle a partner command
pub fn handle_partner_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: PartnerCommands,
) -> BudgetResult<()> {
    match cmd {
        PartnerCommands::List => {
            let household = &storage.data.household;
            let ratio = household.income_ratio();
            println!("{:10} {:20} {:>12} {:>8}", "ID", "Name", "Salary", "Share");
            println!("{}", "-".repeat(53));
            for role in [PartnerRole::User1, PartnerRole::User2] {
                let partner = household.partner(role);
                let share = (ratio.share_of(role) * rust_decimal::Decimal::ONE_HUNDRED).round_dp(1);
                println!(
                    "{:10} {:20} {:>12} {:>7}%",
                    partner.id.to_string(),
                    partner.name,
                    partner.salary.format_with_symbol(&settings.currency_symbol),
                    share
                );
            }
            println!("\nIncome ratio: {}", ratio);
        }

        PartnerCommands::SetSalary { partner, amount } => {
            let salary = parse_amount(&amount)?;
            let role = find_role(storage, &partner)?;
            storage.data.household.partner_mut(role).salary = salary;
            save_household(storage)?;

            let household = &storage.data.household;
            info!(partner = %household.partner(role).id, "updated salary");
            println!(
                "{} now earns {} per month. Income ratio: {}",
                household.partner(role).name,
                salary.format_with_symbol(&settings.currency_symbol),
                household.income_ratio()
            );
        }

        PartnerCommands::Rename { partner, name } => {
            let role = find_role(storage, &partner)?;
            let old = std::mem::replace(
                &mut storage.data.household.partner_mut(role).name,
                name.trim().to_string(),
            );
            save_household(storage)?;
            let partner = storage.data.household.partner(role);
            info!(partner = %partner.id, "renamed partner");
            println!("Renamed {} to {}", old, partner.name);
        }
    }

    Ok(())
}

fn find_role(storage: &Storage, query: &str) -> BudgetResult<PartnerRole> {
    storage
        .data
        .household
        .find(query)
        .ok_or_else(|| BudgetError::partner_not_found(query))
}

fn save_household(storage: &Storage) -> BudgetResult<()> {
    storage
        .data
        .household
        .validate()
        .map_err(|e| BudgetError::Validation(e.to_string()))?;
    storage.save()
}
