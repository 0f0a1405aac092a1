//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod export;
pub mod prefs;
pub mod recurring;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::handle_export_command;
pub use prefs::{handle_prefs_command, handle_sms_command, PrefsCommands, SmsCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
