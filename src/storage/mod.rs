//! Storage layer for Pocket Ledger
//!
//! Everything persists in named slots of a key-value medium. Collections are
//! sealed with the installation secret before they reach the medium;
//! preferences and the SMS flag are stored as plain text.

pub mod file_io;
pub mod file_store;
pub mod memory;
pub mod preferences;
pub mod record_store;
pub mod slots;

pub use file_io::{read_text, write_text_atomic};
pub use file_store::FileSlotStore;
pub use memory::MemorySlotStore;
pub use preferences::PreferencesStore;
pub use record_store::{Loaded, RecordStore, RecoveryReason};
pub use slots::{Slot, SlotStore};

use std::sync::Arc;

use tracing::info;

use crate::config::paths::LedgerPaths;
use crate::crypto::{CipherCodec, KeyManager};
use crate::error::LedgerResult;
use crate::models::{Budget, CategoryRegistry, RecurringTemplate, Transaction};

/// Main storage coordinator giving access to every store
///
/// All stores share one medium and one [`KeyManager`].
pub struct Storage {
    medium: Arc<dyn SlotStore>,
    keys: Arc<KeyManager>,
    pub transactions: RecordStore<Vec<Transaction>>,
    pub recurring: RecordStore<Vec<RecurringTemplate>>,
    pub budgets: RecordStore<Vec<Budget>>,
    pub categories: RecordStore<CategoryRegistry>,
    pub preferences: PreferencesStore,
}

impl Storage {
    /// Open file-backed storage under the configured paths
    pub fn new(paths: &LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::from_medium(Arc::new(FileSlotStore::new(
            paths.slots_dir(),
        ))))
    }

    /// Storage that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::from_medium(Arc::new(MemorySlotStore::new()))
    }

    /// Build every store on top of an existing medium
    pub fn from_medium(medium: Arc<dyn SlotStore>) -> Self {
        let keys = Arc::new(KeyManager::new(medium.clone()));
        let codec = CipherCodec::new(keys.clone());

        Self {
            transactions: RecordStore::new(
                medium.clone(),
                codec.clone(),
                Slot::Transactions,
                Vec::new,
            ),
            recurring: RecordStore::new(medium.clone(), codec.clone(), Slot::Recurring, Vec::new),
            budgets: RecordStore::new(medium.clone(), codec.clone(), Slot::Budgets, Budget::defaults),
            categories: RecordStore::new(
                medium.clone(),
                codec,
                Slot::Categories,
                CategoryRegistry::built_in,
            ),
            preferences: PreferencesStore::new(medium.clone()),
            keys,
            medium,
        }
    }

    pub fn medium(&self) -> &Arc<dyn SlotStore> {
        &self.medium
    }

    pub fn keys(&self) -> &Arc<KeyManager> {
        &self.keys
    }

    /// Status of each encrypted collection, in slot order
    pub fn health(&self) -> LedgerResult<Vec<(Slot, String)>> {
        Ok(vec![
            (self.transactions.slot(), self.transactions.load_outcome()?.status()),
            (self.recurring.slot(), self.recurring.load_outcome()?.status()),
            (self.budgets.slot(), self.budgets.load_outcome()?.status()),
            (self.categories.slot(), self.categories.load_outcome()?.status()),
        ])
    }

    /// Erase every slot, the vault secret included
    ///
    /// Previously exported blobs can never be opened afterwards.
    pub fn wipe(&self) -> LedgerResult<()> {
        self.medium.clear()?;
        info!("wiped all stored data");
        Ok(())
    }
}
