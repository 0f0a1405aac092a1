//! Transaction CLI commands

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Subcommand;

use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Frequency, Money, PaymentMethod, TransactionId};
use crate::reports::parse_month;
use crate::services::{NewTransaction, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense (or income with --income)
    Add {
        /// Amount (e.g., "50" or "1,200.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Title (defaults to the sub-category or category)
        #[arg(short, long)]
        title: Option<String>,
        /// Sub-category
        #[arg(short, long)]
        sub: Option<String>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Payment method: UPI, Cash, Card, Net Banking
        #[arg(short, long, default_value = "UPI")]
        method: PaymentMethod,
        /// Date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        notes: Option<String>,
        /// Also repeat this entry: daily, weekly or monthly
        #[arg(short, long)]
        repeat: Option<Frequency>,
    },

    /// List transactions, newest first
    List {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Maximum number of rows
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one transaction
    Show {
        /// Transaction ID
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    cmd: TransactionCommands,
    now: DateTime<Utc>,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);
    let prefs = storage.preferences.load()?;

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            title,
            sub,
            income,
            method,
            date,
            notes,
            repeat,
        } => {
            let amount = parse_amount(&amount)?;
            let mut input = if income {
                NewTransaction::income(amount, category)
            } else {
                NewTransaction::expense(amount, category)
            };
            input.title = title;
            input.sub_category = sub;
            input.payment_method = method;
            input.notes = notes;
            input.date = date.as_deref().map(parse_date).transpose()?;
            input.frequency = repeat.unwrap_or_default();

            let txn = service.add(input, now)?;
            println!("Recorded: {} {}", txn.title, prefs.format(txn.amount));
            println!("  ID: {}", txn.id);
            println!("  Paid by: {}", txn.payment_method);
            if let Some(frequency) = repeat.filter(|f| f.is_recurring()) {
                println!("  Repeats: {}", frequency);
            }
        }

        TransactionCommands::List { month, limit } => {
            let mut transactions = match month {
                Some(month) => {
                    let (year, month) = parse_month(&month)?;
                    service.list_for_month(year, month)?
                }
                None => service.list()?,
            };
            let total = transactions.len();
            transactions.truncate(limit);

            print!("{}", format_transaction_table(&transactions, &prefs));
            if total > transactions.len() {
                println!("Showing {} of {} transactions", transactions.len(), total);
            }
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .get(&id)?
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, &prefs));
        }

        TransactionCommands::Delete { id } => {
            service.delete(&TransactionId::from(id.as_str()))?;
            println!("Deleted transaction {}", id);
        }
    }

    Ok(())
}

pub(crate) fn parse_amount(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| LedgerError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date as noon UTC
pub(crate) fn parse_date(s: &str) -> LedgerResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))?;
    let noon = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| LedgerError::Validation(format!("Invalid date '{}'", s)))?;
    Ok(Utc.from_utc_datetime(&noon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-05-01").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert!(parse_date("01/05/2024").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,200.50").unwrap().cents(), 120_050);
        assert!(parse_amount("lots").unwrap_err().is_validation());
    }
}
