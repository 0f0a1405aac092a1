//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::CategoryRegistry;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Sub-categories")]
    subcategories: usize,
}

pub fn format_category_list(registry: &CategoryRegistry) -> String {
    if registry.is_empty() {
        return "No categories.\n".to_string();
    }

    let rows = registry.names().iter().map(|name| CategoryRow {
        name: name.to_string(),
        kind: if name.is_sentinel() {
            "built-in (protected)"
        } else if CategoryRegistry::is_built_in(name.as_str()) {
            "built-in"
        } else {
            "custom"
        },
        subcategories: CategoryRegistry::subcategories(name.as_str()).len(),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// List a category's sub-categories
pub fn format_category_details(name: &str) -> String {
    let subs = CategoryRegistry::subcategories(name);
    let mut output = format!("{}\n", name);
    if subs.is_empty() {
        output.push_str("  (no sub-categories)\n");
    }
    for sub in subs {
        output.push_str(&format!("  - {}\n", sub));
    }
    output
}
