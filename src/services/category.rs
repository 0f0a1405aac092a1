//! Category service
//!
//! Adding and removing names in the category set. The two sentinel
//! categories are refused on removal.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryName, CategoryRegistry};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> LedgerResult<CategoryRegistry> {
        self.storage.categories.load()
    }

    /// Add a custom category
    ///
    /// Returns `false` without writing if the name already exists.
    pub fn add(&self, name: &str) -> LedgerResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        let mut registry = self.list()?;
        if !registry.insert(CategoryName::from(name)) {
            return Ok(false);
        }
        self.storage.categories.save(&registry)?;
        info!(category = name, "added category");
        Ok(true)
    }

    /// Remove a category by name
    ///
    /// Existing transactions and budgets keep the name.
    pub fn delete(&self, name: &str) -> LedgerResult<()> {
        let name = name.trim();
        if CategoryName::from(name).is_sentinel() {
            return Err(LedgerError::Protected {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let mut registry = self.list()?;
        if !registry.remove(name) {
            return Err(LedgerError::category_not_found(name));
        }
        self.storage.categories.save(&registry)?;
        info!(category = name, "deleted category");
        Ok(())
    }
}
