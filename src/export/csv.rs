//! CSV export of transactions (spreadsheet-compatible)

use std::io::Write;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

const HEADER: [&str; 9] = [
    "ID",
    "Date",
    "Title",
    "Category",
    "Sub-category",
    "Type",
    "Amount",
    "Payment Method",
    "Notes",
];

/// Export all transactions to CSV, newest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> LedgerResult<usize> {
    let transactions = storage.transactions.load()?;
    let mut out = ::csv::Writer::from_writer(writer);
    let export_err = |e: ::csv::Error| LedgerError::Export(e.to_string());

    out.write_record(HEADER).map_err(export_err)?;

    for txn in &transactions {
        let date = txn.date.to_rfc3339();
        let amount = txn.amount.to_string();
        let kind = if txn.is_expense { "Expense" } else { "Income" };
        out.write_record([
            txn.id.as_str(),
            date.as_str(),
            txn.title.as_str(),
            txn.category.as_str(),
            txn.sub_category.as_deref().unwrap_or(""),
            kind,
            amount.as_str(),
            txn.payment_method.label(),
            txn.notes.as_deref().unwrap_or(""),
        ])
        .map_err(export_err)?;
    }

    out.flush().map_err(|e| LedgerError::Export(e.to_string()))?;
    info!(count = transactions.len(), "exported transactions as CSV");
    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PaymentMethod, Transaction};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_csv_quotes_and_columns() {
        let storage = Storage::in_memory();
        let txn = Transaction::new(
            "Dinner, with friends",
            Money::from_cents(125_050),
            "Food & Groceries",
            true,
            Utc.with_ymd_and_hms(2024, 5, 1, 19, 30, 0).unwrap(),
        )
        .with_payment_method(PaymentMethod::NetBanking)
        .with_notes("split \"evenly\"");
        storage.transactions.insert_front(txn).unwrap();

        let mut buffer = Vec::new();
        assert_eq!(export_transactions_csv(&storage, &mut buffer).unwrap(), 1);
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "ID,Date,Title,Category,Sub-category,Type,Amount,Payment Method,Notes"
        );
        assert!(lines[1].contains("\"Dinner, with friends\""));
        assert!(lines[1].contains(",Expense,1250.50,Net Banking,"));
        assert!(lines[1].ends_with("\"split \"\"evenly\"\"\""));
    }
}
