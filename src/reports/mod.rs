//! Reports module for Pocket Ledger
//!
//! Derived analytics over stored transactions and budgets.

pub mod summary;

pub use summary::{parse_month, BudgetAlert, MonthlySummary, ALERT_THRESHOLD_PERCENT};
