//! Pocket Ledger - personal finance tracker with an encrypted on-device ledger
//!
//! This library records income and expense entries, recurring payments,
//! per-category budgets and display preferences, keeping everything in local
//! storage slots. Collections are sealed with AES-256-GCM under a random
//! device-local key; a slot that cannot be opened reads back as its default
//! rather than failing.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, operator settings and tracing setup
//! - `error`: Custom error types
//! - `crypto`: Vault secret and blob sealing
//! - `models`: Core data models (transactions, templates, budgets, categories)
//! - `storage`: Slot media and typed encrypted collections
//! - `services`: Business logic and the recurring engine
//! - `reports`: Monthly analytics
//! - `export`: Plaintext JSON and CSV export
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::services::{NewTransaction, TransactionService};
//! use pocket_ledger::{models::Money, storage::Storage};
//!
//! let storage = Storage::in_memory();
//! let txn = TransactionService::new(&storage).add(
//!     NewTransaction::expense(Money::from_units(50), "Food & Groceries").titled("Coffee"),
//!     chrono::Utc::now(),
//! )?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
