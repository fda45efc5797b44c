use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_ledger::cli::{
    handle_export_command, handle_ledger_command, handle_report_command, ExportCommands,
    LedgerCommands, ReportCommands,
};
use expense_ledger::config::{self, paths::ExpensePaths, settings::Settings};
use expense_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Command-line expense ledger",
    long_about = "Records daily expenses in a local SQLite ledger, keeps deleted \
                  entries in an undoable trash, and reports daily and monthly \
                  totals as terminal tables, CSV or XLSX files."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Ledger(LedgerCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Export reports to CSV or XLSX
    #[command(subcommand)]
    Export(ExportCommands),

    /// Initialize the data directory and database
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    // .env may provide RUST_LOG
    config::load_env_file();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("expense - command-line expense ledger");
            println!();
            println!("Run 'expense --help' for usage information.");
            return Ok(());
        }
    };

    if let Commands::Config = command {
        print_config(&paths, &settings);
        return Ok(());
    }

    let storage = Storage::open(&paths, &settings)?;

    match command {
        Commands::Ledger(cmd) => handle_ledger_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, &settings, cmd)?,
        Commands::Init => {
            settings.save(&paths)?;
            println!("Initialized expense ledger at: {}", paths.base_dir().display());
            println!("Database: {}", storage.db_path().display());
        }
        Commands::Config => print_config(&paths, &settings),
    }

    storage.close()?;
    Ok(())
}

fn print_config(paths: &ExpensePaths, settings: &Settings) {
    println!("Expense Ledger Configuration");
    println!("============================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Database:       {}", settings.database_file(paths).display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!("Initialized:    {}", paths.is_initialized());
    println!();
    println!("Settings:");
    println!("  Currency symbol:       {}", settings.currency_symbol);
    println!("  Date format:           {}", settings.datetime_format);
    println!("  Default export format: {}", settings.default_export_format);
}
