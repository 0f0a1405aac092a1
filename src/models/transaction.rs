//! Transaction model
//!
//! A transaction is a single income or expense entry. The amount is always
//! positive; direction comes from `is_expense`, which is independent of the
//! category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::CategoryName;
use super::ids::TransactionId;
use super::money::Money;

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "UPI")]
    Upi,
    Cash,
    Card,
    #[serde(rename = "Net Banking")]
    NetBanking,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Upi,
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::NetBanking,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::NetBanking => "Net Banking",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "upi" => Ok(Self::Upi),
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "netbanking" => Ok(Self::NetBanking),
            _ => Err(format!(
                "Unknown payment method '{}' (expected UPI, Cash, Card or Net Banking)",
                s
            )),
        }
    }
}

/// A recorded income or expense entry
///
/// Never mutated once saved; removed only by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    pub title: String,

    /// Always positive
    pub amount: Money,

    pub category: CategoryName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    pub date: DateTime<Utc>,

    pub is_expense: bool,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    /// Create a new transaction with a fresh id, paid by UPI
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        category: impl Into<CategoryName>,
        is_expense: bool,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            title: title.into(),
            amount,
            category: category.into(),
            sub_category: None,
            date,
            is_expense,
            payment_method: PaymentMethod::default(),
            notes: None,
        }
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.title.trim().is_empty() {
            return Err(TransactionValidationError::EmptyTitle);
        }
        if self.category.as_str().trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_expense { "-" } else { "+" };
        write!(
            f,
            "{} {} {}{} ({})",
            self.date.format("%Y-%m-%d"),
            self.title,
            sign,
            self.amount,
            self.category
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyTitle,
    EmptyCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::EmptyTitle => write!(f, "Transaction title cannot be empty"),
            Self::EmptyCategory => write!(f, "Transaction category cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
