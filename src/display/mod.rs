//! Display formatting for terminal output
//!
//! Formatting helpers return `String`s; the CLI decides where they go.

pub mod budget;
pub mod category;
pub mod recurring;
pub mod transaction;

pub use budget::format_budget_table;
pub use category::{format_category_details, format_category_list};
pub use recurring::format_template_table;
pub use transaction::{format_transaction_details, format_transaction_table};
