//! Transaction service
//!
//! Adding, listing and deleting income/expense entries.

use chrono::{DateTime, Datelike, Utc};
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    CategoryName, Frequency, Money, PaymentMethod, RecurringTemplate, Transaction, TransactionId,
};
use crate::storage::Storage;

/// Input for a new entry
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Defaults to the sub-category, or the category, when blank
    pub title: Option<String>,
    pub amount: Money,
    pub category: CategoryName,
    pub sub_category: Option<String>,
    pub is_expense: bool,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    /// Defaults to now
    pub date: Option<DateTime<Utc>>,
    /// Anything other than `None` also registers a recurring template
    pub frequency: Frequency,
}

impl NewTransaction {
    pub fn expense(amount: Money, category: impl Into<CategoryName>) -> Self {
        Self {
            title: None,
            amount,
            category: category.into(),
            sub_category: None,
            is_expense: true,
            payment_method: PaymentMethod::default(),
            notes: None,
            date: None,
            frequency: Frequency::None,
        }
    }

    pub fn income(amount: Money, category: impl Into<CategoryName>) -> Self {
        Self {
            is_expense: false,
            ..Self::expense(amount, category)
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn repeating(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    fn resolved_title(&self) -> String {
        let non_blank = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        non_blank(&self.title)
            .or_else(|| non_blank(&self.sub_category))
            .unwrap_or_else(|| self.category.to_string())
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new entry at the front of the list
    ///
    /// The category must be known to the category set.
    pub fn add(&self, input: NewTransaction, now: DateTime<Utc>) -> LedgerResult<Transaction> {
        let categories = self.storage.categories.load()?;
        if !categories.contains(input.category.as_str()) {
            return Err(LedgerError::category_not_found(input.category.as_str()));
        }

        let mut txn = Transaction::new(
            input.resolved_title(),
            input.amount,
            input.category.clone(),
            input.is_expense,
            input.date.unwrap_or(now),
        )
        .with_payment_method(input.payment_method);
        txn.sub_category = input.sub_category.clone().filter(|s| !s.trim().is_empty());
        txn.notes = input.notes.clone().filter(|s| !s.trim().is_empty());

        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.transactions.insert_front(txn.clone())?;
        info!(id = %txn.id, "recorded transaction");

        if input.frequency.is_recurring() {
            let template = RecurringTemplate::from_transaction(&txn, input.frequency, now);
            self.storage.recurring.push(template)?;
        }

        Ok(txn)
    }

    /// All entries, newest first
    pub fn list(&self) -> LedgerResult<Vec<Transaction>> {
        self.storage.transactions.load()
    }

    /// Entries dated within the given calendar month
    pub fn list_for_month(&self, year: i32, month: u32) -> LedgerResult<Vec<Transaction>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .collect())
    }

    pub fn get(&self, id: &str) -> LedgerResult<Option<Transaction>> {
        Ok(self.list()?.into_iter().find(|t| t.id.as_str() == id))
    }

    /// Delete an entry by id
    pub fn delete(&self, id: &TransactionId) -> LedgerResult<()> {
        let removed = self.storage.transactions.remove_where(|t| &t.id == id)?;
        if removed == 0 {
            return Err(LedgerError::transaction_not_found(id.as_str()));
        }
        info!(id = %id, "deleted transaction");
        Ok(())
    }
}
