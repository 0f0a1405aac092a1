//! Core data models for Pocket Ledger
//!
//! The records the ledger persists: transactions, recurring templates,
//! budgets, categories and display preferences.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod preferences;
pub mod recurring;
pub mod transaction;

pub use budget::Budget;
pub use category::{CategoryName, CategoryRegistry};
pub use ids::{TemplateId, TransactionId};
pub use money::Money;
pub use preferences::{Currency, UserPreferences};
pub use recurring::{Frequency, RecurringTemplate};
pub use transaction::{PaymentMethod, Transaction};
