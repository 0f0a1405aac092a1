//! Monthly summary
//!
//! Income, spending, savings and budget alerts for one calendar month.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, CategoryName, Money, Transaction, UserPreferences};
use crate::storage::Storage;

/// Spending share at which a budget raises an alert
pub const ALERT_THRESHOLD_PERCENT: f64 = 80.0;

/// A category whose spending is at or above the alert threshold
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub category: CategoryName,
    pub spent: Money,
    pub limit: Money,
    pub percent: f64,
}

/// Summary of one month's activity
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: Money,
    pub total_expense: Money,
    /// Income minus spending, never below zero
    pub net_savings: Money,
    /// Net savings as a rounded share of income
    pub savings_percent: i64,
    /// Spending against the monthly income target, capped at 100
    pub budget_used_percent: f64,
    /// Expense totals per category, largest first
    pub by_category: Vec<(CategoryName, Money)>,
    /// Largest overrun first
    pub alerts: Vec<BudgetAlert>,
    pub transaction_count: usize,
}

impl MonthlySummary {
    /// Build the summary from storage
    pub fn generate(storage: &Storage, year: i32, month: u32) -> LedgerResult<Self> {
        let transactions = storage.transactions.load()?;
        let budgets = storage.budgets.load()?;
        let prefs = storage.preferences.load()?;
        Ok(Self::compute(&transactions, &budgets, &prefs, year, month))
    }

    pub fn compute(
        transactions: &[Transaction],
        budgets: &[Budget],
        prefs: &UserPreferences,
        year: i32,
        month: u32,
    ) -> Self {
        let in_month: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .collect();

        let mut total_income = Money::zero();
        let mut total_expense = Money::zero();
        let mut spending: HashMap<&CategoryName, Money> = HashMap::new();

        for txn in &in_month {
            if txn.is_expense {
                total_expense += txn.amount;
                *spending.entry(&txn.category).or_default() += txn.amount;
            } else {
                total_income += txn.amount;
            }
        }

        let net_savings = if total_income > total_expense {
            total_income - total_expense
        } else {
            Money::zero()
        };

        let savings_percent = if total_income.is_positive() {
            (net_savings.cents() as f64 * 100.0 / total_income.cents() as f64).round() as i64
        } else {
            0
        };

        let target = prefs.total_monthly_income;
        let budget_used_percent = if target.is_positive() {
            (total_expense.cents() as f64 * 100.0 / target.cents() as f64).min(100.0)
        } else {
            0.0
        };

        let mut alerts: Vec<BudgetAlert> = budgets
            .iter()
            .filter_map(|budget| {
                let spent = spending.get(&budget.category).copied().unwrap_or_default();
                let percent = budget.percent_used(spent);
                (percent >= ALERT_THRESHOLD_PERCENT).then(|| BudgetAlert {
                    category: budget.category.clone(),
                    spent,
                    limit: budget.limit_amount,
                    percent,
                })
            })
            .collect();
        alerts.sort_by(|a, b| b.percent.total_cmp(&a.percent));

        let mut by_category: Vec<(CategoryName, Money)> = spending
            .into_iter()
            .map(|(name, amount)| (name.clone(), amount))
            .collect();
        by_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            year,
            month,
            total_income,
            total_expense,
            net_savings,
            savings_percent,
            budget_used_percent,
            by_category,
            alerts,
            transaction_count: in_month.len(),
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, prefs: &UserPreferences) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary for {}-{:02}\n", self.year, self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Income:       {}\n", prefs.format(self.total_income)));
        output.push_str(&format!("Spent:        {}\n", prefs.format(self.total_expense)));
        output.push_str(&format!(
            "Saved:        {} ({}%)\n",
            prefs.format(self.net_savings),
            self.savings_percent
        ));
        output.push_str(&format!(
            "Budget used:  {:.0}% of {}\n",
            self.budget_used_percent,
            prefs.format(prefs.total_monthly_income)
        ));
        output.push_str(&format!("Transactions: {}\n", self.transaction_count));

        if !self.by_category.is_empty() {
            output.push_str("\nSpending by category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for (category, amount) in &self.by_category {
                output.push_str(&format!("  {:<40} {:>15}\n", category, prefs.format(*amount)));
            }
        }

        if !self.alerts.is_empty() {
            output.push_str("\nBudget alerts\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for alert in &self.alerts {
                output.push_str(&format!(
                    "  {:<32} {:>5.0}%  {} of {}\n",
                    alert.category,
                    alert.percent,
                    prefs.format(alert.spent),
                    prefs.format(alert.limit)
                ));
            }
        }

        output
    }
}

/// Parse a `YYYY-MM` month
pub fn parse_month(s: &str) -> LedgerResult<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| LedgerError::Validation(format!("Invalid month '{}', expected YYYY-MM", s)))?;
    Ok((date.year(), date.month()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn txn(amount: i64, category: &str, is_expense: bool, day: u32) -> Transaction {
        Transaction::new(
            "t",
            Money::from_units(amount),
            category,
            is_expense,
            Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
        )
    }

    fn budgets() -> Vec<Budget> {
        vec![
            Budget::new("Food & Groceries", Money::from_units(1000)),
            Budget::new("Transportation", Money::from_units(1000)),
            Budget::new("Travel & Vacation", Money::from_units(500)),
        ]
    }

    #[test]
    fn test_totals_and_savings() {
        let transactions = vec![
            txn(10000, "Income", false, 1),
            txn(900, "Food & Groceries", true, 2),
            txn(1500, "Transportation", true, 3),
        ];
        let prefs = UserPreferences {
            total_monthly_income: Money::from_units(12000),
            ..UserPreferences::default()
        };

        let summary = MonthlySummary::compute(&transactions, &budgets(), &prefs, 2024, 5);

        assert_eq!(summary.total_income, Money::from_units(10000));
        assert_eq!(summary.total_expense, Money::from_units(2400));
        assert_eq!(summary.net_savings, Money::from_units(7600));
        assert_eq!(summary.savings_percent, 76);
        assert_eq!(summary.budget_used_percent, 20.0);
        assert_eq!(summary.by_category[0].0.as_str(), "Transportation");
    }

    #[test]
    fn test_alerts_sorted_by_percent() {
        let transactions = vec![
            txn(800, "Food & Groceries", true, 2),
            txn(1500, "Transportation", true, 3),
            txn(100, "Travel & Vacation", true, 4),
        ];
        let summary = MonthlySummary::compute(
            &transactions,
            &budgets(),
            &UserPreferences::default(),
            2024,
            5,
        );

        let names: Vec<&str> = summary.alerts.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(names, vec!["Transportation", "Food & Groceries"]);
        assert_eq!(summary.alerts[0].percent, 150.0);
    }

    #[test]
    fn test_overspending_floors_savings_and_caps_usage() {
        let transactions = vec![txn(100, "Income", false, 1), txn(90000, "Transportation", true, 2)];
        let summary = MonthlySummary::compute(
            &transactions,
            &[],
            &UserPreferences::default(),
            2024,
            5,
        );
        assert_eq!(summary.net_savings, Money::zero());
        assert_eq!(summary.savings_percent, 0);
        assert_eq!(summary.budget_used_percent, 100.0);
    }

    #[test]
    fn test_other_months_ignored() {
        let mut june = txn(100, "Transportation", true, 1);
        june.date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let summary =
            MonthlySummary::compute(&[june], &[], &UserPreferences::default(), 2024, 5);
        assert_eq!(summary.transaction_count, 0);
        assert!(summary.total_expense.is_zero());
    }

    #[test]
    fn test_huge_totals_saturate() {
        let mut big = txn(1, "Transportation", true, 4);
        big.amount = Money::from_cents(i64::MAX / 2 + 1);
        let transactions = vec![big.clone(), big.clone(), big];

        let summary =
            MonthlySummary::compute(&transactions, &budgets(), &UserPreferences::default(), 2024, 5);

        assert_eq!(summary.total_expense.cents(), i64::MAX);
        assert_eq!(summary.budget_used_percent, 100.0);
        assert_eq!(summary.alerts[0].category.as_str(), "Transportation");
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-05").unwrap(), (2024, 5));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("May").is_err());
    }
}
