//! Configuration module for Pocket Ledger
//!
//! - Platform path resolution
//! - Operator settings persistence
//! - Tracing subscriber setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use logging::init_tracing;
pub use paths::LedgerPaths;
pub use settings::Settings;
