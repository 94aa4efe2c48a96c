//! Balance and dashboard CLI commands

use chrono::Local;
use clap::Args;

use crate::config::Settings;
use crate::display::{format_balances, format_stats, format_transfers};
use crate::error::FairshareResult;
use crate::ledger::ShareScope;
use crate::services::BalanceService;
use crate::storage::Store;

/// Arguments for `fairshare balance`
#[derive(Args, Debug, Default)]
pub struct BalanceArgs {
    /// Only count shares that have not been settled
    #[arg(long)]
    pub pending: bool,
    /// Show the net debt between each pair of people
    #[arg(long)]
    pub pairwise: bool,
    /// Suggest the fewest payments that settle everyone up
    #[arg(long)]
    pub settle_up: bool,
}

/// Handle the balance command
pub fn handle_balance_command(
    store: &dyn Store,
    settings: &Settings,
    args: BalanceArgs,
) -> FairshareResult<()> {
    let service = BalanceService::new(store);
    let symbol = settings.currency_symbol.as_str();
    let scope = if args.pending {
        ShareScope::Pending
    } else {
        ShareScope::All
    };

    let sheet = service.sheet(scope)?;
    print!("{}", format_balances(&sheet, symbol, args.pending));

    if args.pairwise {
        let (people, debts) = service.pairwise(scope)?;
        println!();
        print!("{}", format_transfers(&people, &debts, symbol, "Who owes whom"));
    }

    if args.settle_up {
        let (people, transfers) = service.settle_up(scope)?;
        println!();
        print!("{}", format_transfers(&people, &transfers, symbol, "Settle up"));
    }

    Ok(())
}

/// Handle the stats command
pub fn handle_stats_command(store: &dyn Store, settings: &Settings) -> FairshareResult<()> {
    let stats = BalanceService::new(store).stats(Local::now().date_naive())?;
    print!("{}", format_stats(&stats, &settings.currency_symbol));
    Ok(())
}
