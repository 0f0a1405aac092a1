//! Preference and SMS-detection CLI commands

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::models::Currency;
use crate::storage::Storage;

use super::transaction::parse_amount;

/// Preference subcommands
#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show current preferences
    Show,

    /// Change preferences
    Set {
        /// Display currency: INR, USD, EUR, GBP (or the symbol)
        #[arg(long)]
        currency: Option<Currency>,
        /// Monthly income target
        #[arg(long)]
        income: Option<String>,
        /// Dark mode flag
        #[arg(long)]
        dark_mode: Option<bool>,
    },
}

/// SMS-detection subcommands
#[derive(Subcommand)]
pub enum SmsCommands {
    Enable,
    Disable,
    Status,
}

/// Handle a preferences command
pub fn handle_prefs_command(storage: &Storage, cmd: PrefsCommands) -> LedgerResult<()> {
    let mut prefs = storage.preferences.load()?;

    match cmd {
        PrefsCommands::Show => {}
        PrefsCommands::Set {
            currency,
            income,
            dark_mode,
        } => {
            if let Some(currency) = currency {
                prefs.currency = currency;
            }
            if let Some(income) = income {
                prefs.set_monthly_income(parse_amount(&income)?);
            }
            if let Some(dark_mode) = dark_mode {
                prefs.is_dark_mode = dark_mode;
            }
            storage.preferences.save(&prefs)?;
            println!("Preferences saved.");
        }
    }

    println!("Currency:       {} ({})", prefs.currency, prefs.currency.code());
    println!("Monthly income: {}", prefs.format(prefs.total_monthly_income));
    println!("Dark mode:      {}", prefs.is_dark_mode);
    Ok(())
}

/// Handle an SMS-detection command
pub fn handle_sms_command(storage: &Storage, cmd: SmsCommands) -> LedgerResult<()> {
    match cmd {
        SmsCommands::Enable => storage.preferences.set_sms_detection(true)?,
        SmsCommands::Disable => storage.preferences.set_sms_detection(false)?,
        SmsCommands::Status => {}
    }

    let state = if storage.preferences.sms_detection()? {
        "enabled"
    } else {
        "disabled"
    };
    println!("SMS detection: {}", state);
    Ok(())
}
