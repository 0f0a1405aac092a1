//! Budget service
//!
//! Per-category limits. A category carries at most one budget; setting a
//! limit replaces the existing entry or appends a new one.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the limit for a category, creating its budget if needed
    pub fn set_limit(&self, category: &str, limit: Money) -> LedgerResult<Budget> {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation(
                "Budget category cannot be empty".into(),
            ));
        }
        if limit.cents() < 0 {
            return Err(LedgerError::Validation(format!(
                "Budget limit cannot be negative (got {})",
                limit
            )));
        }

        let budget = Budget::new(category, limit);
        let replaced = self
            .storage
            .budgets
            .upsert_by(|b| b.category == *category, budget.clone())?;

        info!(category, limit = %limit, replaced, "set budget limit");
        Ok(budget)
    }

    pub fn list(&self) -> LedgerResult<Vec<Budget>> {
        self.storage.budgets.load()
    }

    pub fn get(&self, category: &str) -> LedgerResult<Option<Budget>> {
        Ok(self.list()?.into_iter().find(|b| b.category == *category))
    }
}
