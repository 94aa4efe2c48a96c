//! CLI command for data export

use std::path::PathBuf;

use clap::Args;

use crate::error::FairshareResult;
use crate::export::{export_to_path, ExportFormat, ExportTarget};
use crate::services::{ExpenseService, PersonService};
use crate::storage::Store;

/// Arguments for `fairshare export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// What to export: expenses or balances
    pub target: ExportTarget,
    /// Output format: csv or json
    pub format: ExportFormat,
    /// Output file path
    pub output: PathBuf,
}

/// Handle the export command
pub fn handle_export_command(store: &dyn Store, args: ExportArgs) -> FairshareResult<()> {
    let people = PersonService::new(store).list()?;
    let expenses = ExpenseService::new(store).all()?;
    let (people_count, expense_count) = (people.len(), expenses.len());

    export_to_path(people, expenses, args.target, args.format, &args.output)?;

    println!(
        "Exported {} as {} to: {}",
        args.target,
        args.format,
        args.output.display()
    );
    match args.target {
        ExportTarget::Expenses => println!("  {} expenses, {} people", expense_count, people_count),
        ExportTarget::Balances => println!("  {} people", people_count),
    }

    Ok(())
}
