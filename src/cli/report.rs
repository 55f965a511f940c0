//! CLI commands for reports
//!
//! Every report prints to the terminal, or writes CSV when `--output` is
//! given.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Args;

use super::{parse_date, parse_month};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::reports::{
    BalanceReport, CategoryBreakdownReport, MonthlyHistoryReport, ProjectionReport,
    ProjectsReport,
};
use crate::services::{BalanceEngine, ExpenseFilter};
use crate::storage::Storage;

/// Options shared by the expense-based reports
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Restrict to one month (YYYY-MM)
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub month: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Export to a CSV file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    pub fn filter(&self) -> BudgetResult<ExpenseFilter> {
        let mut filter = ExpenseFilter::new();
        if let Some(month) = &self.month {
            let (year, month) = parse_month(month)?;
            filter = filter.month(year, month);
        }
        if let Some(start) = &self.start {
            filter.start_date = Some(parse_date(Some(start))?);
        }
        if let Some(end) = &self.end {
            filter.end_date = Some(parse_date(Some(end))?);
        }
        Ok(filter)
    }
}

fn csv_file(path: &Path) -> BudgetResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

pub fn handle_balance_report(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> BudgetResult<()> {
    let engine = BalanceEngine::new(settings.settle_tolerance)
        .with_currency_symbol(settings.currency_symbol.clone());
    let report = BalanceReport::generate(storage, &args.filter()?, &engine, &settings.currency_symbol)?;

    match args.output {
        Some(path) => {
            report.export_csv(csv_file(&path)?)?;
            println!("Balance exported to: {}", path.display());
        }
        None => print!("{}", report.format_terminal()),
    }
    Ok(())
}

pub fn handle_breakdown_report(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> BudgetResult<()> {
    let report =
        CategoryBreakdownReport::generate(storage, &args.filter()?, &settings.currency_symbol)?;

    match args.output {
        Some(path) => {
            report.export_csv(csv_file(&path)?)?;
            println!("Category breakdown exported to: {}", path.display());
        }
        None => print!("{}", report.format_terminal()),
    }
    Ok(())
}

pub fn handle_history_report(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
    limit: Option<usize>,
    show_items: bool,
) -> BudgetResult<()> {
    let report = MonthlyHistoryReport::generate(
        storage,
        &args.filter()?,
        &settings.currency_symbol,
        limit,
    )?
    .with_items(show_items);

    match args.output {
        Some(path) => {
            report.export_csv(csv_file(&path)?)?;
            println!("Monthly history exported to: {}", path.display());
        }
        None => print!("{}", report.format_terminal()),
    }
    Ok(())
}

pub fn handle_projection_report(
    storage: &Storage,
    settings: &Settings,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let report = ProjectionReport::generate(storage, &settings.currency_symbol)?;

    match output {
        Some(path) => {
            report.export_csv(csv_file(&path)?)?;
            println!("Projection exported to: {}", path.display());
        }
        None => print!("{}", report.format_terminal()),
    }
    Ok(())
}

pub fn handle_projects_report(
    storage: &Storage,
    settings: &Settings,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let report = ProjectsReport::generate(storage, &settings.currency_symbol);

    match output {
        Some(path) => {
            report.export_csv(csv_file(&path)?)?;
            println!("Projects exported to: {}", path.display());
        }
        None => print!("{}", report.format_terminal()),
    }
    Ok(())
}
