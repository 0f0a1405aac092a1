//! Service layer for Pocket Ledger
//!
//! Business rules on top of the storage layer: validation, defaults, and the
//! recurring engine.

pub mod budget;
pub mod category;
pub mod recurring;
pub mod transaction;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use recurring::{Materialized, RecurringEngine};
pub use transaction::{NewTransaction, TransactionService};
