//! JSON export
//!
//! Writes every transaction as a plain, unencrypted JSON array in the same
//! shape the ledger stores internally, suitable as a user-held backup.

use std::io::Write;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

/// Export all transactions as a pretty-printed JSON array
pub fn export_transactions_json<W: Write>(storage: &Storage, writer: &mut W) -> LedgerResult<usize> {
    let transactions = storage.transactions.load()?;

    serde_json::to_writer_pretty(&mut *writer, &transactions)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;

    info!(count = transactions.len(), "exported transactions as JSON");
    Ok(transactions.len())
}
