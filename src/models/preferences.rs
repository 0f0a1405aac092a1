//! Display preferences

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Supported display currencies, stored as their symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "₹")]
    Inr,
    #[serde(rename = "$")]
    Usd,
    #[serde(rename = "€")]
    Eur,
    #[serde(rename = "£")]
    Gbp,
}

impl Currency {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Currency {
    type Err = String;

    /// Accepts either the ISO code or the symbol
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INR" | "₹" => Ok(Currency::Inr),
            "USD" | "$" => Ok(Currency::Usd),
            "EUR" | "€" => Ok(Currency::Eur),
            "GBP" | "£" => Ok(Currency::Gbp),
            _ => Err(format!(
                "Unknown currency '{}' (expected INR, USD, EUR or GBP)",
                s
            )),
        }
    }
}

/// User display preferences, stored unencrypted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub is_dark_mode: bool,

    /// Denominator of the budget-used figure
    #[serde(default = "default_monthly_income")]
    pub total_monthly_income: Money,
}

fn default_monthly_income() -> Money {
    Money::from_units(75000)
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            is_dark_mode: false,
            total_monthly_income: default_monthly_income(),
        }
    }
}

impl UserPreferences {
    /// Set the monthly income target, clamping negatives to zero
    pub fn set_monthly_income(&mut self, amount: Money) {
        self.total_monthly_income = if amount.cents() < 0 {
            Money::zero()
        } else {
            amount
        };
    }

    /// Format an amount in the preferred currency
    pub fn format(&self, amount: Money) -> String {
        amount.format_with_symbol(self.currency.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.currency, Currency::Inr);
        assert!(!prefs.is_dark_mode);
        assert_eq!(prefs.total_monthly_income, Money::from_units(75000));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&UserPreferences::default()).unwrap();
        assert_eq!(
            json,
            r#"{"currency":"₹","isDarkMode":false,"totalMonthlyIncome":75000}"#
        );

        let prefs: UserPreferences =
            serde_json::from_str(r#"{"currency":"£","isDarkMode":true,"totalMonthlyIncome":1200.5}"#)
                .unwrap();
        assert_eq!(prefs.currency, Currency::Gbp);
        assert_eq!(prefs.total_monthly_income.cents(), 120_050);
    }

    #[test]
    fn test_missing_fields_default() {
        let prefs: UserPreferences = serde_json::from_str(r#"{"currency":"$"}"#).unwrap();
        assert_eq!(prefs.currency, Currency::Usd);
        assert_eq!(prefs.total_monthly_income, Money::from_units(75000));
    }

    #[test]
    fn test_negative_income_clamps() {
        let mut prefs = UserPreferences::default();
        prefs.set_monthly_income(Money::from_units(-10));
        assert_eq!(prefs.total_monthly_income, Money::zero());
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("€".parse::<Currency>().unwrap(), Currency::Eur);
        assert!("JPY".parse::<Currency>().is_err());
    }
}
