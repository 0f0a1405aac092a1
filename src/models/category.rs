//! Categories
//!
//! A category is identified by its name alone. The ledger ships a fixed map
//! of built-in categories with sub-categories; users may append their own
//! names. Two entries are sentinels and can never be removed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the built-in income category
pub const INCOME: &str = "Income";

/// Name of the primary built-in expense category
pub const FOOD_AND_GROCERIES: &str = "Food & Groceries";

/// Categories that cannot be removed
pub const SENTINELS: [&str; 2] = [INCOME, FOOD_AND_GROCERIES];

/// Built-in categories and their sub-categories, in display order
pub const BUILT_IN: &[(&str, &[&str])] = &[
    (
        "Housing & Utilities",
        &[
            "House rent",
            "Maintenance charges",
            "Property tax",
            "Electricity bill",
            "Water bill",
            "Gas cylinder / piped gas",
            "Internet (broadband / fiber)",
            "Mobile recharge / postpaid bill",
            "DTH / cable / OTT subscriptions",
        ],
    ),
    (
        FOOD_AND_GROCERIES,
        &[
            "Monthly groceries",
            "Vegetables & fruits",
            "Milk & dairy",
            "Eating out / restaurants",
            "Street food",
            "Online food delivery (Swiggy, Zomato)",
            "Office canteen",
        ],
    ),
    (
        "Transportation",
        &[
            "Fuel (petrol / diesel / CNG)",
            "Public transport (bus, metro, train)",
            "Auto / taxi (Ola, Uber)",
            "Vehicle EMI",
            "Vehicle servicing & repairs",
            "Parking fees",
            "Toll charges",
        ],
    ),
    (
        "Health & Medical",
        &[
            "Doctor consultations",
            "Medicines",
            "Lab tests",
            "Hospital expenses",
            "Health insurance premium",
            "Fitness / gym",
            "Yoga / wellness",
        ],
    ),
    (
        "Education & Learning",
        &[
            "School / college fees",
            "Tuition / coaching",
            "Online courses",
            "Books & stationery",
            "Exam fees",
        ],
    ),
    (
        "Personal & Lifestyle",
        &[
            "Clothing & footwear",
            "Salon / parlour",
            "Cosmetics & grooming",
            "Accessories",
            "Laundry / dry cleaning",
        ],
    ),
    (
        "Entertainment & Leisure",
        &[
            "Movies / theatre",
            "OTT subscriptions",
            "Games & apps",
            "Hobbies",
            "Travel & outings",
        ],
    ),
    (
        "Travel & Vacation",
        &[
            "Flight / train / bus tickets",
            "Hotel / homestay",
            "Local transport during travel",
            "Food during travel",
            "Sightseeing",
            "Travel insurance",
        ],
    ),
    (
        "Family & Social",
        &[
            "Gifts (festivals, birthdays, weddings)",
            "Donations / charity",
            "Functions & ceremonies",
            "Child expenses",
            "Elder care",
        ],
    ),
    (
        "Financial Commitments",
        &[
            "Loan EMI (home, car, personal)",
            "Credit card bill",
            "Insurance premiums (life, vehicle)",
            "Investments (SIP, RD, PPF, NPS)",
            "Taxes",
        ],
    ),
    (
        "Digital & Online",
        &[
            "App subscriptions",
            "Cloud storage",
            "Software licenses",
            "Domain / hosting",
        ],
    ),
    (
        "Household & Miscellaneous",
        &[
            "House help / maid salary",
            "Repairs & maintenance",
            "Furniture & appliances",
            "Home décor",
            "Pest control",
        ],
    ),
    (
        "Emergency / Irregular",
        &[
            "Medical emergencies",
            "Repairs",
            "Unexpected travel",
            "Penalties / fines",
        ],
    ),
    (
        INCOME,
        &[
            "Salary",
            "Freelance",
            "Investment Returns",
            "Gift",
            "Other Income",
        ],
    ),
];

/// A category name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the non-removable built-ins
    pub fn is_sentinel(&self) -> bool {
        SENTINELS.contains(&self.0.as_str())
    }

    pub fn is_income(&self) -> bool {
        self.0 == INCOME
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CategoryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for CategoryName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// The ordered set of category names known to the ledger
///
/// Persisted as a plain JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    names: Vec<CategoryName>,
}

impl CategoryRegistry {
    /// The built-in category list
    pub fn built_in() -> Self {
        Self {
            names: BUILT_IN.iter().map(|(name, _)| CategoryName::from(*name)).collect(),
        }
    }

    pub fn from_names(names: Vec<CategoryName>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[CategoryName] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Append a name, returning `false` if it was already present
    ///
    /// The name must already be trimmed and non-empty.
    pub(crate) fn insert(&mut self, name: CategoryName) -> bool {
        if self.contains(name.as_str()) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Remove a name, returning `false` if it was absent
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    /// Sub-categories of a built-in category; empty for custom names
    pub fn subcategories(name: &str) -> &'static [&'static str] {
        BUILT_IN
            .iter()
            .find(|(category, _)| *category == name)
            .map(|(_, subs)| *subs)
            .unwrap_or(&[])
    }

    pub fn is_built_in(name: &str) -> bool {
        BUILT_IN.iter().any(|(category, _)| *category == name)
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::built_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_list() {
        let registry = CategoryRegistry::built_in();
        assert_eq!(registry.len(), 14);
        assert_eq!(registry.names()[0].as_str(), "Housing & Utilities");
        assert!(registry.contains(INCOME));
        assert!(registry.contains(FOOD_AND_GROCERIES));
    }

    #[test]
    fn test_sentinels() {
        assert!(CategoryName::from("Income").is_sentinel());
        assert!(CategoryName::from("Food & Groceries").is_sentinel());
        assert!(!CategoryName::from("Transportation").is_sentinel());
    }

    #[test]
    fn test_subcategories() {
        let subs = CategoryRegistry::subcategories(INCOME);
        assert_eq!(subs, &["Salary", "Freelance", "Investment Returns", "Gift", "Other Income"]);
        assert!(CategoryRegistry::subcategories("Pets").is_empty());
    }

    #[test]
    fn test_insert_and_remove() {
        let mut registry = CategoryRegistry::built_in();
        assert!(registry.insert("Pets".into()));
        assert!(!registry.insert("Pets".into()));
        assert_eq!(registry.names().last().unwrap().as_str(), "Pets");

        assert!(registry.remove("Pets"));
        assert!(!registry.remove("Pets"));
    }

    #[test]
    fn test_serializes_as_string_array() {
        let registry = CategoryRegistry::from_names(vec!["Income".into(), "Pets".into()]);
        assert_eq!(
            serde_json::to_string(&registry).unwrap(),
            r#"["Income","Pets"]"#
        );
    }
}
