//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::BudgetResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Display color (#RRGGBB)
        #[arg(short, long)]
        color: Option<String>,
        /// Icon name
        #[arg(short, long)]
        icon: Option<String>,
    },
    /// List categories and how often they are used
    List,
    /// Rename or recolor a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color (#RRGGBB)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a category no expense or charge uses
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &mut Storage, cmd: CategoryCommands) -> BudgetResult<()> {
    let mut service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add { name, color, icon } => {
            let category = service.create(&name, color.as_deref(), icon.as_deref())?;
            println!("Created category: {}", category.name);
            println!("  Color: {}", category.color);
            println!("  ID:    {}", category.id);
        }

        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()));
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            if name.is_none() && color.is_none() {
                println!("No changes specified. Use --name or --color.");
                return Ok(());
            }
            let updated = service.update(&category, name.as_deref(), color.as_deref())?;
            println!("Updated category: {} ({})", updated.name, updated.color);
        }

        CategoryCommands::Delete { category } => {
            let removed = service.delete(&category)?;
            println!("Deleted category: {}", removed.name);
        }
    }

    Ok(())
}
