//! Recurring payment templates
//!
//! A template describes a payment that repeats on a fixed frequency. Its
//! `last_processed_date` cursor records the date of the most recent
//! materialized occurrence.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::CategoryName;
use super::ids::TemplateId;
use super::money::Money;
use super::transaction::{PaymentMethod, Transaction};

/// How often a template repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// The next occurrence after `from`, or `None` for non-repeating templates
    ///
    /// Monthly steps keep the day of month, clamped to the last day of a
    /// shorter month (Jan 31 -> Feb 29 in a leap year).
    pub fn advance(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Frequency::None => None,
            Frequency::Daily => from.checked_add_signed(Duration::days(1)),
            Frequency::Weekly => from.checked_add_signed(Duration::days(7)),
            Frequency::Monthly => from.checked_add_months(Months::new(1)),
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Frequency::None)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::None => write!(f, "None"),
            Frequency::Daily => write!(f, "Daily"),
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Frequency::None),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(format!(
                "Unknown frequency '{}' (expected none, daily, weekly or monthly)",
                s
            )),
        }
    }
}

/// A repeating payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    pub id: TemplateId,

    pub title: String,

    pub amount: Money,

    pub category: CategoryName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    pub is_expense: bool,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[serde(default)]
    pub frequency: Frequency,

    /// Date of the last materialized occurrence; never moves backwards
    pub last_processed_date: DateTime<Utc>,

    pub start_date: DateTime<Utc>,
}

impl RecurringTemplate {
    /// Create a template whose first occurrence is one period after `now`
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        category: impl Into<CategoryName>,
        is_expense: bool,
        frequency: Frequency,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TemplateId::new(),
            title: title.into(),
            amount,
            category: category.into(),
            sub_category: None,
            is_expense,
            payment_method: PaymentMethod::default(),
            frequency,
            last_processed_date: now,
            start_date: now,
        }
    }

    /// Build a template from the fields of an entered transaction
    pub fn from_transaction(txn: &Transaction, frequency: Frequency, now: DateTime<Utc>) -> Self {
        let mut template = Self::new(
            txn.title.clone(),
            txn.amount,
            txn.category.clone(),
            txn.is_expense,
            frequency,
            now,
        );
        template.sub_category = txn.sub_category.clone();
        template.payment_method = txn.payment_method;
        template
    }

    /// When the next occurrence falls due
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.frequency.advance(self.last_processed_date)
    }
}

impl fmt::Display for RecurringTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.amount, self.frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_advance_daily_weekly() {
        assert_eq!(Frequency::Daily.advance(at(2024, 2, 28)), Some(at(2024, 2, 29)));
        assert_eq!(Frequency::Weekly.advance(at(2024, 12, 28)), Some(at(2025, 1, 4)));
        assert_eq!(Frequency::None.advance(at(2024, 1, 1)), None);
    }

    #[test]
    fn test_advance_monthly_clamps_to_month_end() {
        assert_eq!(Frequency::Monthly.advance(at(2024, 1, 15)), Some(at(2024, 2, 15)));
        assert_eq!(Frequency::Monthly.advance(at(2024, 1, 31)), Some(at(2024, 2, 29)));
        assert_eq!(Frequency::Monthly.advance(at(2023, 1, 31)), Some(at(2023, 2, 28)));
        assert_eq!(Frequency::Monthly.advance(at(2024, 12, 31)), Some(at(2025, 1, 31)));
    }

    #[test]
    fn test_new_template_starts_now() {
        let now = at(2024, 3, 1);
        let template = RecurringTemplate::new(
            "Rent",
            Money::from_units(15000),
            "Housing & Utilities",
            true,
            Frequency::Monthly,
            now,
        );
        assert_eq!(template.start_date, now);
        assert_eq!(template.last_processed_date, now);
        assert_eq!(template.next_due(), Some(at(2024, 4, 1)));
    }

    #[test]
    fn test_wire_field_names() {
        let template = RecurringTemplate::new(
            "Gym",
            Money::from_units(1200),
            "Health & Medical",
            true,
            Frequency::Monthly,
            at(2024, 3, 1),
        );
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["frequency"], "Monthly");
        assert!(json.get("lastProcessedDate").is_some());
        assert!(json.get("startDate").is_some());
        assert_eq!(json["isExpense"], true);
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("Daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!(" monthly ".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!("yearly".parse::<Frequency>().is_err());
    }
}
