//! Savings project CLI commands

use clap::Subcommand;
use tracing::info;

use super::{parse_amount, parse_date};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::SavingsProject;
use crate::storage::Storage;

/// Savings project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Start a savings project
    Add {
        /// Project name (e.g., "Summer trip")
        name: String,
        /// Amount to save
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        /// Notes
        #[arg(long)]
        description: Option<String>,
    },
    /// Record a partner's contribution to a project
    Contribute {
        /// Project name or ID
        project: String,
        /// Partner name, ID, "user1" or "user2"
        partner: String,
        /// Amount contributed
        amount: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Delete a project; its expenses are kept and detached
    Delete {
        /// Project name or ID
        project: String,
    },
}

/// Handle a savings project command
pub fn handle_project_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ProjectCommands,
) -> BudgetResult<()> {
    let symbol = &settings.currency_symbol;

    match cmd {
        ProjectCommands::Add {
            name,
            target,
            deadline,
            description,
        } => {
            if storage.find_project(&name).is_ok() {
                return Err(BudgetError::Validation(format!(
                    "A project named '{}' already exists",
                    name.trim()
                )));
            }

            let mut project = SavingsProject::new(name.trim(), parse_amount(&target)?);
            if let Some(deadline) = deadline {
                project = project.with_deadline(parse_date(Some(&deadline))?);
            }
            if let Some(description) = description {
                project.description = description;
            }
            project
                .validate()
                .map_err(|e| BudgetError::Validation(e.to_string()))?;

            storage.data.projects.push(project.clone());
            storage.save()?;
            info!(project = %project.id, "created savings project");

            println!("Created project: {}", project.name);
            println!("  Target: {}", project.target_amount.format_with_symbol(symbol));
            if let Some(deadline) = project.deadline {
                println!("  Deadline: {}", deadline);
            }
            println!("  ID: {}", project.id);
        }

        ProjectCommands::Contribute {
            project,
            partner,
            amount,
            date,
            note,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date(date.as_deref())?;
            let project_id = storage.find_project(&project)?.id;
            let household = &storage.data.household;
            let role = household
                .find(&partner)
                .ok_or_else(|| BudgetError::partner_not_found(partner.clone()))?;
            let partner = household.partner(role).clone();

            let target = storage
                .data
                .projects
                .iter_mut()
                .find(|p| p.id == project_id)
                .ok_or_else(|| BudgetError::project_not_found(project.clone()))?;
            target.add_contribution(partner.id, amount, date, note);
            target
                .validate()
                .map_err(|e| BudgetError::Validation(e.to_string()))?;

            println!(
                "{} contributed {} to {}",
                partner.name,
                amount.format_with_symbol(symbol),
                target.name
            );
            println!(
                "  Saved: {} / {}{}",
                target.current_amount().format_with_symbol(symbol),
                target.target_amount.format_with_symbol(symbol),
                if target.is_completed() { " (completed)" } else { "" }
            );

            info!(project = %project_id, amount = %amount, "recorded contribution");
            storage.save()?;
        }

        ProjectCommands::Delete { project } => {
            let project_id = storage.find_project(&project)?.id;
            storage.data.projects.retain(|p| p.id != project_id);
            for expense in storage
                .data
                .expenses
                .iter_mut()
                .filter(|e| e.project_id == Some(project_id))
            {
                expense.project_id = None;
            }
            storage.save()?;

            info!(project = %project_id, "deleted savings project");
            println!("Deleted project: {}", project);
        }
    }

    Ok(())
}
