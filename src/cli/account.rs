//! Account CLI commands

use clap::Subcommand;

use crate::display::format_account_list;
use crate::error::BudgetResult;
use crate::models::AccountOwner;
use crate::services::AccountService;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Create an account
    Add {
        /// Account name
        name: String,
        /// joint, user1 or user2
        #[arg(short, long, default_value = "joint")]
        owner: String,
    },
    /// List accounts
    List,
    /// Rename an account
    Rename {
        /// Account name or ID
        account: String,
        /// New name
        name: String,
    },
    /// Delete an account no expense was paid from
    Delete {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(storage: &mut Storage, cmd: AccountCommands) -> BudgetResult<()> {
    match cmd {
        AccountCommands::Add { name, owner } => {
            let owner: AccountOwner = owner.parse()?;
            let account = AccountService::new(storage).create(&name, owner)?;
            println!("Created account: {}", account.name);
            println!("  Owner: {}", account.owner);
            println!("  ID:    {}", account.id);
        }

        AccountCommands::List => {
            let household = storage.data.household.clone();
            let service = AccountService::new(storage);
            print!("{}", format_account_list(&service.list(), &household));
        }

        AccountCommands::Rename { account, name } => {
            let renamed = AccountService::new(storage).rename(&account, &name)?;
            println!("Renamed account to {}", renamed.name);
        }

        AccountCommands::Delete { account } => {
            let removed = AccountService::new(storage).delete(&account)?;
            println!("Deleted account: {}", removed.name);
        }
    }

    Ok(())
}
