//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Transaction, UserPreferences};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Method")]
    method: String,
}

/// Format a list of transactions as a table, newest first
pub fn format_transaction_table(transactions: &[Transaction], prefs: &UserPreferences) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date.format("%Y-%m-%d").to_string(),
        title: truncate(&txn.title, 28),
        category: match &txn.sub_category {
            Some(sub) => format!("{} / {}", txn.category, truncate(sub, 20)),
            None => txn.category.to_string(),
        },
        amount: format_signed(txn, prefs),
        method: txn.payment_method.to_string(),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, prefs: &UserPreferences) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Title:       {}\n", txn.title));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d %H:%M")));
    output.push_str(&format!("Amount:      {}\n", format_signed(txn, prefs)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    if let Some(sub) = &txn.sub_category {
        output.push_str(&format!("Sub:         {}\n", sub));
    }
    output.push_str(&format!("Paid by:     {}\n", txn.payment_method));
    if let Some(notes) = &txn.notes {
        output.push_str(&format!("Notes:       {}\n", notes));
    }

    output
}

fn format_signed(txn: &Transaction, prefs: &UserPreferences) -> String {
    let sign = if txn.is_expense { "-" } else { "+" };
    format!("{}{}", sign, prefs.format(txn.amount))
}

/// Truncate a string to a maximum number of characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
