//! Budget display formatting

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, CategoryName, Money, UserPreferences};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Format budgets alongside this month's spending per category
pub fn format_budget_table(
    budgets: &[Budget],
    spent: &HashMap<CategoryName, Money>,
    prefs: &UserPreferences,
) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let rows = budgets.iter().map(|budget| {
        let amount = spent.get(&budget.category).copied().unwrap_or_default();
        BudgetRow {
            category: budget.category.to_string(),
            limit: prefs.format(budget.limit_amount),
            spent: prefs.format(amount),
            used: format!("{:.0}%", budget.percent_used(amount)),
        }
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_table() {
        let budgets = vec![Budget::new("Transportation", Money::from_units(1000))];
        let mut spent = HashMap::new();
        spent.insert(CategoryName::from("Transportation"), Money::from_units(250));

        let output = format_budget_table(&budgets, &spent, &UserPreferences::default());
        assert!(output.contains("Transportation"));
        assert!(output.contains("₹1000"));
        assert!(output.contains("25%"));
    }
}
