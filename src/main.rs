use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use fairshare::cli::{
    handle_audit_command, handle_balance_command, handle_expense_command, handle_export_command,
    handle_person_command, handle_stats_command, BalanceArgs, ExpenseCommands, ExportArgs,
    PersonCommands,
};
use fairshare::config::{FairsharePaths, Settings};
use fairshare::error::FairshareError;
use fairshare::logging;
use fairshare::storage::open_store;

#[derive(Parser)]
#[command(
    name = "fairshare",
    version,
    about = "Split shared expenses and track who owes whom",
    long_about = "fairshare records expenses paid by one person and shared by several, \
                  splits them equally or by custom amounts, and keeps a running net \
                  balance for everyone. Data lives in local JSON files or on a REST \
                  backend."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and write default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// People management commands
    #[command(subcommand)]
    Person(PersonCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show net balances
    Balance(BalanceArgs),

    /// Show dashboard figures
    Stats,

    /// Export expenses or balances to a file
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FairsharePaths::new()?;
    let settings = Settings::load_or_create(&paths)?.with_env_overrides();
    logging::init(&settings.log_level)?;

    let Some(command) = cli.command else {
        println!("fairshare - split shared expenses");
        println!();
        println!("Run 'fairshare --help' for usage information.");
        println!("Run 'fairshare init' to get started.");
        return Ok(());
    };

    if let Err(e) = run(command, &paths, &settings) {
        if e.is_store_failure() {
            error!(error = %e, "store request failed");
            eprintln!("Error: the request could not be completed. Please try again.");
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(
    command: Commands,
    paths: &FairsharePaths,
    settings: &Settings,
) -> Result<(), FairshareError> {
    match command {
        Commands::Init => {
            println!("Initializing fairshare at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            // Env overrides apply to this run only
            Settings::load_or_create(paths)?.save(paths)?;
            println!("Initialization complete!");
            println!();
            println!("Add people with 'fairshare person add <name>',");
            println!("then record expenses with 'fairshare expense add'.");
        }
        Commands::Config => {
            print_config(paths, settings);
            if paths.is_initialized() {
                let store = open_store(paths, settings)?;
                println!("  Store:            {}", store.describe());
            }
        }
        Commands::Audit { limit } => handle_audit_command(paths, limit)?,
        Commands::Person(cmd) => {
            let store = open_store(paths, settings)?;
            handle_person_command(store.as_ref(), settings, cmd)?;
        }
        Commands::Expense(cmd) => {
            let store = open_store(paths, settings)?;
            handle_expense_command(store.as_ref(), settings, cmd)?;
        }
        Commands::Balance(args) => {
            let store = open_store(paths, settings)?;
            handle_balance_command(store.as_ref(), settings, args)?;
        }
        Commands::Stats => {
            let store = open_store(paths, settings)?;
            handle_stats_command(store.as_ref(), settings)?;
        }
        Commands::Export(args) => {
            let store = open_store(paths, settings)?;
            handle_export_command(store.as_ref(), args)?;
        }
    }

    Ok(())
}

fn print_config(paths: &FairsharePaths, settings: &Settings) {
    println!("fairshare Configuration");
    println!("=======================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!("Initialized:    {}", if paths.is_initialized() { "yes" } else { "no" });
    println!();
    println!("Settings:");
    println!("  Backend:          {:?}", settings.backend);
    println!("  API URL:          {}", settings.api_url);
    println!("  Default currency: {}", settings.default_currency);
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
    match logging::parse_level(&settings.log_level) {
        Ok(level) => println!("  Log level:        {}", level),
        Err(e) => println!("  Log level:        {} ({})", settings.log_level, e),
    }
    println!("  Request timeout:  {}s", settings.request_timeout_secs);
}
