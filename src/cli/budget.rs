//! Budget CLI commands

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use clap::Subcommand;

use crate::display::format_budget_table;
use crate::error::LedgerResult;
use crate::models::{CategoryName, Money};
use crate::reports::parse_month;
use crate::services::{BudgetService, TransactionService};
use crate::storage::Storage;

use super::transaction::parse_amount;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly limit for a category
    Set {
        /// Category name
        category: String,
        /// Limit amount
        amount: String,
    },

    /// Show limits and spending
    List {
        /// Month to measure spending in (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    cmd: BudgetCommands,
    now: DateTime<Utc>,
) -> LedgerResult<()> {
    let service = BudgetService::new(storage);
    let prefs = storage.preferences.load()?;

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let budget = service.set_limit(&category, parse_amount(&amount)?)?;
            println!(
                "Budget for {} set to {}",
                budget.category,
                prefs.format(budget.limit_amount)
            );
        }

        BudgetCommands::List { month } => {
            let (year, month) = match month {
                Some(month) => parse_month(&month)?,
                None => (now.year(), now.month()),
            };

            let mut spent: HashMap<CategoryName, Money> = HashMap::new();
            for txn in TransactionService::new(storage).list_for_month(year, month)? {
                if txn.is_expense {
                    *spent.entry(txn.category).or_default() += txn.amount;
                }
            }

            println!("Budgets for {}-{:02}", year, month);
            print!("{}", format_budget_table(&service.list()?, &spent, &prefs));
        }
    }

    Ok(())
}
