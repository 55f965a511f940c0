//! Expense CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_month};
use crate::config::Settings;
use crate::display::format_expense_list;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Frequency, SplitType};
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Short label (e.g., "Rent")
        label: String,
        /// Amount in the billing frequency (e.g., "1200" or "29.99")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Account name or ID; "joint", "user1" or "user2" pick by owner
        #[arg(short, long, default_value = "joint")]
        account: String,
        /// Partner who paid (name, ID, "user1" or "user2")
        #[arg(short, long)]
        payer: String,
        /// Date paid (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// one_time, monthly, quarterly or annual
        #[arg(short, long, default_value = "one_time")]
        frequency: String,
        /// 50_50, ratio, 33_67, 67_33, 100_user1 or 100_user2
        #[arg(short, long, default_value = "50_50")]
        split: String,
        /// Savings project this expense belongs to
        #[arg(long)]
        project: Option<String>,
        /// Notes
        #[arg(long)]
        description: Option<String>,
    },
    /// List expenses, newest first
    List {
        /// Restrict to one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Partner who paid
        #[arg(short, long)]
        payer: Option<String>,
        /// Account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Savings project name or ID
        #[arg(long)]
        project: Option<String>,
        /// Text the label must contain
        #[arg(long)]
        search: Option<String>,
        /// Only recurring expenses
        #[arg(long)]
        recurring: bool,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Change the amount or split of an expense
    Edit {
        /// Expense ID (the short form shown by `list` works)
        id: String,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New split policy
        #[arg(short, long)]
        split: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID (the short form shown by `list` works)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    match cmd {
        ExpenseCommands::Add {
            label,
            amount,
            category,
            account,
            payer,
            date,
            frequency,
            split,
            project,
            description,
        } => {
            let input = CreateExpenseInput {
                label,
                amount: parse_amount(&amount)?,
                date: parse_date(date.as_deref())?,
                category,
                account,
                payer,
                frequency: frequency.parse::<Frequency>()?,
                split_type: split.parse::<SplitType>()?,
                project,
                description,
            };

            let expense = ExpenseService::new(storage).create(input)?;

            println!("Recorded expense: {}", expense.label);
            println!(
                "  Amount: {} ({})",
                expense.amount.format_with_symbol(&settings.currency_symbol),
                expense.frequency.label()
            );
            println!("  Split:  {}", expense.split_type.label());
            println!("  ID:     {}", expense.id);
        }

        ExpenseCommands::List {
            month,
            category,
            payer,
            account,
            project,
            search,
            recurring,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(month) = month {
                let (year, month) = parse_month(&month)?;
                filter = filter.month(year, month);
            }
            if let Some(category) = category {
                filter = filter.category(storage.find_category(&category)?.id);
            }
            if let Some(payer) = payer {
                let household = &storage.data.household;
                let role = household
                    .find(&payer)
                    .ok_or_else(|| BudgetError::partner_not_found(payer.clone()))?;
                filter = filter.payer(household.partner(role).id);
            }
            if let Some(account) = account {
                filter = filter.account(storage.find_account(&account)?.id);
            }
            if let Some(project) = project {
                filter = filter.project(storage.find_project(&project)?.id);
            }
            if let Some(search) = search {
                filter = filter.label(search);
            }
            if recurring {
                filter = filter.recurring(true);
            }

            let expenses: Vec<_> = ExpenseService::new(storage)
                .list(&filter)
                .into_iter()
                .take(limit)
                .cloned()
                .collect();
            let shown: Vec<_> = expenses.iter().collect();
            print!("{}", format_expense_list(&shown, storage, settings));
        }

        ExpenseCommands::Edit { id, amount, split } => {
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let split = split.map(|s| s.parse::<SplitType>()).transpose()?;
            let expense = ExpenseService::new(storage).update(&id, amount, split)?;
            println!(
                "Updated expense: {} {} ({})",
                expense.label,
                expense.amount.format_with_symbol(&settings.currency_symbol),
                expense.split_type.label()
            );
        }

        ExpenseCommands::Delete { id } => {
            let removed = ExpenseService::new(storage).delete(&id)?;
            println!("Deleted expense: {} ({})", removed.label, removed.id);
        }
    }

    Ok(())
}
