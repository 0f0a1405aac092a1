//! Recurring template display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{RecurringTemplate, UserPreferences};

use super::transaction::truncate;

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Every")]
    frequency: String,
    #[tabled(rename = "Next due")]
    next_due: String,
}

pub fn format_template_table(templates: &[RecurringTemplate], prefs: &UserPreferences) -> String {
    if templates.is_empty() {
        return "No recurring payments.\n".to_string();
    }

    let rows = templates.iter().map(|t| TemplateRow {
        id: t.id.to_string(),
        title: truncate(&t.title, 28),
        category: t.category.to_string(),
        amount: format!(
            "{}{}",
            if t.is_expense { "-" } else { "+" },
            prefs.format(t.amount)
        ),
        frequency: t.frequency.to_string(),
        next_due: t
            .next_due()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}
