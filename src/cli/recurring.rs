//! Recurring payment CLI commands

use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_template_table, format_transaction_table};
use crate::error::LedgerResult;
use crate::models::{Frequency, PaymentMethod, RecurringTemplate, TemplateId};
use crate::services::RecurringEngine;
use crate::storage::Storage;

use super::transaction::parse_amount;

/// Recurring subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Register a recurring payment, first due one period from now
    Add {
        /// Title
        title: String,
        /// Amount
        amount: String,
        /// daily, weekly or monthly
        #[arg(short, long)]
        frequency: Frequency,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Sub-category
        #[arg(short, long)]
        sub: Option<String>,
        /// Recurring income instead of an expense
        #[arg(long)]
        income: bool,
        /// Payment method: UPI, Cash, Card, Net Banking
        #[arg(short, long, default_value = "UPI")]
        method: PaymentMethod,
    },

    /// List recurring payments
    List,

    /// Change the amount, category or frequency of a recurring payment
    Edit {
        /// Template ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        frequency: Option<Frequency>,
    },

    /// Delete a recurring payment
    Delete {
        /// Template ID
        id: String,
    },

    /// Materialize due payments now
    Run,
}

/// Handle a recurring command
pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecurringCommands,
    now: DateTime<Utc>,
) -> LedgerResult<()> {
    let engine = RecurringEngine::new(storage).with_prefix(settings.recurring_prefix.clone());
    let prefs = storage.preferences.load()?;

    match cmd {
        RecurringCommands::Add {
            title,
            amount,
            frequency,
            category,
            sub,
            income,
            method,
        } => {
            let amount = parse_amount(&amount)?;
            let mut template =
                RecurringTemplate::new(title, amount, category, !income, frequency, now);
            template.sub_category = sub;
            template.payment_method = method;

            let template = engine.add(template)?;
            println!("Added recurring payment: {}", template.title);
            println!("  ID: {}", template.id);
            if let Some(next) = template.next_due() {
                println!("  Next due: {}", next.format("%Y-%m-%d"));
            }
        }

        RecurringCommands::List => {
            print!("{}", format_template_table(&engine.list()?, &prefs));
        }

        RecurringCommands::Edit {
            id,
            amount,
            category,
            frequency,
        } => {
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let template = engine.edit(
                &TemplateId::from(id.as_str()),
                amount,
                category.as_deref(),
                frequency,
            )?;
            println!(
                "Updated {}: {} every {}",
                template.title,
                prefs.format(template.amount),
                template.frequency
            );
        }

        RecurringCommands::Delete { id } => {
            engine.delete(&TemplateId::from(id.as_str()))?;
            println!("Deleted recurring payment {}", id);
        }

        RecurringCommands::Run => {
            let result = engine.run(now)?;
            if result.is_empty() {
                println!("Nothing due.");
            } else {
                println!("Created {} transaction(s):", result.created.len());
                print!("{}", format_transaction_table(&result.created, &prefs));
            }
        }
    }

    Ok(())
}
