//! Recurring templates and their materialization
//!
//! [`RecurringEngine::materialize_due`] is pure: it turns templates and a
//! clock reading into new transactions plus advanced templates.
//! [`RecurringEngine::run`] does the same against storage.
//!
//! Each run emits at most one occurrence per template, even when several
//! periods have elapsed. A ledger left unopened for ten days catches up on a
//! daily template one day per run.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::settings::DEFAULT_RECURRING_PREFIX;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Frequency, Money, RecurringTemplate, TemplateId, Transaction};
use crate::storage::Storage;

/// Output of one materialization pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Materialized {
    /// New transactions, one per due template
    pub created: Vec<Transaction>,
    /// The full template list with due cursors advanced
    pub updated: Vec<RecurringTemplate>,
}

impl Materialized {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }
}

/// Turns recurring templates into transactions
pub struct RecurringEngine<'a> {
    storage: &'a Storage,
    prefix: String,
}

impl<'a> RecurringEngine<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            prefix: DEFAULT_RECURRING_PREFIX.to_string(),
        }
    }

    /// Use a different title prefix for generated transactions
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Compute what is due at `now` without touching storage
    pub fn materialize_due(&self, templates: &[RecurringTemplate], now: DateTime<Utc>) -> Materialized {
        let mut created = Vec::new();
        let mut updated = Vec::with_capacity(templates.len());

        for template in templates {
            let mut template = template.clone();
            if let Some(next_due) = template.next_due() {
                if now >= next_due {
                    let mut txn = Transaction::new(
                        format!("{}{}", self.prefix, template.title),
                        template.amount,
                        template.category.clone(),
                        template.is_expense,
                        next_due,
                    )
                    .with_payment_method(template.payment_method);
                    txn.sub_category = template.sub_category.clone();

                    created.push(txn);
                    template.last_processed_date = next_due;
                }
            }
            updated.push(template);
        }

        Materialized { created, updated }
    }

    /// Materialize due occurrences and persist the result
    ///
    /// New transactions are prepended newest first; the advanced templates
    /// replace the stored list. Nothing is written when nothing is due. If
    /// the templates cannot be saved, the transaction slot is put back as it
    /// was.
    pub fn run(&self, now: DateTime<Utc>) -> LedgerResult<Materialized> {
        let templates = self.storage.recurring.load()?;
        let mut result = self.materialize_due(&templates, now);
        if result.is_empty() {
            return Ok(result);
        }

        result.created.sort_by(|a, b| b.date.cmp(&a.date));
        let before = self.storage.transactions.snapshot()?;
        self.storage
            .transactions
            .insert_many_front(result.created.clone())?;

        // Cursors that fail to advance must not leave their occurrences behind
        if let Err(e) = self.storage.recurring.save(&result.updated) {
            if let Err(restore_err) = self.storage.transactions.restore(before) {
                warn!(error = %restore_err, "failed to roll back recurring transactions");
            }
            return Err(e);
        }

        info!(count = result.created.len(), "materialized recurring transactions");
        Ok(result)
    }

    // === Template management ===

    /// Register a template starting at `now`
    pub fn add(&self, template: RecurringTemplate) -> LedgerResult<RecurringTemplate> {
        if !template.amount.is_positive() {
            return Err(LedgerError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }
        if template.title.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Template title cannot be empty".into(),
            ));
        }
        Self::check_frequency(template.frequency)?;
        self.check_category(template.category.as_str())?;
        self.storage.recurring.push(template.clone())?;
        Ok(template)
    }

    pub fn list(&self) -> LedgerResult<Vec<RecurringTemplate>> {
        self.storage.recurring.load()
    }

    /// Replace a template by id, returning whether it existed
    pub fn update(&self, template: RecurringTemplate) -> LedgerResult<bool> {
        let id = template.id.clone();
        self.storage.recurring.replace_where(|t| t.id == id, template)
    }

    /// Edit amount, category or frequency of an existing template
    pub fn edit(
        &self,
        id: &TemplateId,
        amount: Option<Money>,
        category: Option<&str>,
        frequency: Option<Frequency>,
    ) -> LedgerResult<RecurringTemplate> {
        let mut template = self
            .list()?
            .into_iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| LedgerError::template_not_found(id.as_str()))?;

        if let Some(amount) = amount {
            if !amount.is_positive() {
                return Err(LedgerError::Validation(
                    "Amount must be greater than zero".into(),
                ));
            }
            template.amount = amount;
        }
        if let Some(category) = category {
            self.check_category(category)?;
            template.category = category.into();
        }
        if let Some(frequency) = frequency {
            Self::check_frequency(frequency)?;
            template.frequency = frequency;
        }

        self.update(template.clone())?;
        Ok(template)
    }

    pub fn delete(&self, id: &TemplateId) -> LedgerResult<()> {
        if self.storage.recurring.remove_where(|t| &t.id == id)? == 0 {
            return Err(LedgerError::template_not_found(id.as_str()));
        }
        Ok(())
    }

    fn check_frequency(frequency: Frequency) -> LedgerResult<()> {
        if !frequency.is_recurring() {
            return Err(LedgerError::Validation(
                "Recurring payments need a daily, weekly or monthly frequency".into(),
            ));
        }
        Ok(())
    }

    fn check_category(&self, category: &str) -> LedgerResult<()> {
        if !self.storage.categories.load()?.contains(category) {
            return Err(LedgerError::category_not_found(category));
        }
        Ok(())
    }
}
