//! Per-category spending limits

use serde::{Deserialize, Serialize};

use super::category::{CategoryName, BUILT_IN};
use super::money::Money;

/// Limit applied to each built-in category on a fresh install
pub const DEFAULT_LIMIT: Money = Money::from_units(5000);

/// A monthly spending limit for one category
///
/// The category is not checked against the category set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub category: CategoryName,
    pub limit_amount: Money,
}

impl Budget {
    pub fn new(category: impl Into<CategoryName>, limit_amount: Money) -> Self {
        Self {
            category: category.into(),
            limit_amount,
        }
    }

    /// One budget per built-in category at [`DEFAULT_LIMIT`]
    pub fn defaults() -> Vec<Budget> {
        BUILT_IN
            .iter()
            .map(|(name, _)| Budget::new(*name, DEFAULT_LIMIT))
            .collect()
    }

    /// Share of the limit consumed by `spent`, as a percentage
    ///
    /// A zero limit reports 0 when nothing is spent and 100 otherwise.
    pub fn percent_used(&self, spent: Money) -> f64 {
        if self.limit_amount.is_zero() {
            return if spent.is_positive() { 100.0 } else { 0.0 };
        }
        spent.cents() as f64 * 100.0 / self.limit_amount.cents() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_built_ins() {
        let budgets = Budget::defaults();
        assert_eq!(budgets.len(), BUILT_IN.len());
        assert!(budgets.iter().all(|b| b.limit_amount == DEFAULT_LIMIT));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Budget::new("Transportation", Money::from_units(3000)))
            .unwrap();
        assert_eq!(json, r#"{"category":"Transportation","limitAmount":3000}"#);
    }

    #[test]
    fn test_percent_used() {
        let budget = Budget::new("Transportation", Money::from_units(1000));
        assert_eq!(budget.percent_used(Money::from_units(800)), 80.0);

        let zero = Budget::new("Transportation", Money::zero());
        assert_eq!(zero.percent_used(Money::zero()), 0.0);
        assert_eq!(zero.percent_used(Money::from_units(1)), 100.0);
    }
}
