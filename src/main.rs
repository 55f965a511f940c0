use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use duo_budget::cli::{
    handle_account_command, handle_balance_report, handle_breakdown_report,
    handle_category_command, handle_charge_command, handle_child_command, handle_expense_command,
    handle_history_report, handle_partner_command, handle_project_command,
    handle_projection_report, handle_projects_report, AccountCommands, CategoryCommands,
    ChargeCommands, ChildCommands, ExpenseCommands, PartnerCommands, ProjectCommands, ReportArgs,
};
use duo_budget::config::{BudgetPaths, Settings};
use duo_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "duobudget",
    version,
    about = "Shared-expense tracker for couples",
    long_about = "DuoBudget records what two partners spend, splits every expense \
                  by its policy (equal, income ratio, fixed thirds or fully one \
                  partner) and tells you who owes whom. It also projects the \
                  monthly cost of recurring charges."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a household for two partners
    Init {
        /// First partner's name
        user1: String,
        /// Second partner's name
        user2: String,
    },

    /// Show current configuration and paths
    Config,

    /// Who owes whom
    Balance(ReportArgs),

    /// Spending per category
    Breakdown(ReportArgs),

    /// Spending month by month
    History {
        #[command(flatten)]
        args: ReportArgs,
        /// Only the most recent N months
        #[arg(short, long)]
        limit: Option<usize>,
        /// List the expenses of each month
        #[arg(short, long)]
        items: bool,
    },

    /// Monthly and annual cost of the recurring charges
    Projection {
        /// Export to a CSV file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Savings project progress
    Projects {
        /// Export to a CSV file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Recurring charge management commands
    #[command(subcommand)]
    Charge(ChargeCommands),

    /// Partner management commands
    #[command(subcommand)]
    Partner(PartnerCommands),

    /// Savings project commands
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Dependent allowance commands
    #[command(subcommand)]
    Child(ChildCommands),
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duo_budget=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Init { user1, user2 }) => {
            Storage::initialize(paths.clone(), &user1, &user2)?;
            settings.save(&paths)?;
            println!("Initialized DuoBudget at: {}", paths.data_dir().display());
            println!();
            println!("Accounts: Joint, {} personal, {} personal", user1, user2);
            println!();
            println!("Next, set each partner's income for ratio splits:");
            println!("  duobudget partner set-salary {} <amount>", user1);
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("DuoBudget Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Settle tolerance:  {}", settings.settle_tolerance);
            println!("  Date format:       {}", settings.date_format);
            return Ok(());
        }
        None => {
            println!("DuoBudget - shared expenses for two");
            println!();
            println!("Run 'duobudget --help' for usage information.");
            return Ok(());
        }
        Some(command) => command,
    };

    if !paths.is_initialized() {
        bail!("No household found. Run 'duobudget init <partner1> <partner2>' first.");
    }
    let mut storage = Storage::open(paths)?;

    match command {
        Commands::Balance(args) => handle_balance_report(&storage, &settings, args)?,
        Commands::Breakdown(args) => handle_breakdown_report(&storage, &settings, args)?,
        Commands::History { args, limit, items } => {
            handle_history_report(&storage, &settings, args, limit, items)?
        }
        Commands::Projection { output } => handle_projection_report(&storage, &settings, output)?,
        Commands::Projects { output } => handle_projects_report(&storage, &settings, output)?,
        Commands::Expense(cmd) => handle_expense_command(&mut storage, &settings, cmd)?,
        Commands::Charge(cmd) => handle_charge_command(&mut storage, &settings, cmd)?,
        Commands::Partner(cmd) => handle_partner_command(&mut storage, &settings, cmd)?,
        Commands::Project(cmd) => handle_project_command(&mut storage, &settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&mut storage, cmd)?,
        Commands::Account(cmd) => handle_account_command(&mut storage, cmd)?,
        Commands::Child(cmd) => handle_child_command(&mut storage, &settings, cmd)?,
        Commands::Init { .. } | Commands::Config => unreachable!("handled above"),
    }

    Ok(())
}
