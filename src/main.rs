use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use tracing::debug;

use pocket_ledger::cli::{
    handle_budget_command, handle_category_command, handle_export_command, handle_prefs_command,
    handle_recurring_command, handle_sms_command, handle_transaction_command,
};
use pocket_ledger::config::{init_tracing, LedgerPaths, Settings};
use pocket_ledger::export::ExportFormat;
use pocket_ledger::reports::{parse_month, MonthlySummary};
use pocket_ledger::services::RecurringEngine;
use pocket_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Personal finance tracker with an encrypted on-device ledger",
    long_about = "Pocket Ledger records income and expenses, recurring payments and \
                  per-category budgets. Everything is stored locally, encrypted with \
                  a key generated on first use."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(pocket_ledger::cli::TransactionCommands),

    /// Recurring payment commands
    #[command(subcommand)]
    Recurring(pocket_ledger::cli::RecurringCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(pocket_ledger::cli::BudgetCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(pocket_ledger::cli::CategoryCommands),

    /// Display preferences
    #[command(subcommand)]
    Prefs(pocket_ledger::cli::PrefsCommands),

    /// Monthly income, spending and budget alerts
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },

    /// Export all transactions as plaintext
    Export {
        /// json or csv
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// SMS-detection flag
    #[command(subcommand)]
    Sms(pocket_ledger::cli::SmsCommands),

    /// Erase all data, including the encryption key
    Wipe {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }
    init_tracing(&settings.log);

    let storage = Storage::new(&paths)?;
    let now = Utc::now();

    if !matches!(cli.command, Some(Commands::Wipe { .. }) | Some(Commands::Config)) {
        let result = RecurringEngine::new(&storage)
            .with_prefix(settings.recurring_prefix.clone())
            .run(now)?;
        if !result.is_empty() {
            eprintln!(
                "Added {} recurring transaction(s).",
                result.created.len()
            );
        }
        debug!(created = result.created.len(), "startup recurring run");
    }

    match cli.command {
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, cmd, now)?,
        Some(Commands::Recurring(cmd)) => handle_recurring_command(&storage, &settings, cmd, now)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd, now)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Prefs(cmd)) => handle_prefs_command(&storage, cmd)?,
        Some(Commands::Summary { month }) => {
            let (year, month) = match month {
                Some(month) => parse_month(&month)?,
                None => (now.year(), now.month()),
            };
            let summary = MonthlySummary::generate(&storage, year, month)?;
            let prefs = storage.preferences.load()?;
            print!("{}", summary.format_terminal(&prefs));
        }
        Some(Commands::Export { format, output }) => {
            handle_export_command(&storage, format, output)?
        }
        Some(Commands::Sms(cmd)) => handle_sms_command(&storage, cmd)?,
        Some(Commands::Wipe { yes }) => {
            if !yes {
                bail!("Refusing to wipe without --yes. This erases every record and the encryption key.");
            }
            storage.wipe()?;
            println!("All data erased.");
        }
        Some(Commands::Config) => {
            println!("Pocket Ledger Configuration");
            println!("===========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Slots directory: {}", paths.slots_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Log filter:       {}", settings.log.filter);
            println!("  JSON logs:        {}", settings.log.json);
            println!("  Recurring prefix: {:?}", settings.recurring_prefix);
            println!(
                "  Vault key:        {}",
                if storage.keys().has_secret()? {
                    "present"
                } else {
                    "not yet created"
                }
            );
            println!();
            println!("Collections:");
            for (slot, status) in storage.health()? {
                println!("  {:<30} {}", slot.key(), status);
            }
        }
        None => {
            println!("Pocket Ledger - encrypted personal finance tracker");
            println!();
            println!("Run 'pocket --help' for usage information.");
        }
    }

    Ok(())
}
