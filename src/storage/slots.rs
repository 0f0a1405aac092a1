//! Named storage slots and the key-value medium they live in
//!
//! A slot is one named location holding one text value. Everything the
//! ledger persists - the key seed, each encrypted collection, preferences -
//! occupies exactly one slot.

use std::fmt;

use crate::error::LedgerResult;

/// Every slot the ledger knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Base64 of the 32-byte secret (plaintext; it is the key)
    VaultSeed,
    Transactions,
    Recurring,
    Budgets,
    Categories,
    /// Unencrypted JSON preferences
    Preferences,
    /// `"true"` / `"false"`
    SmsDetection,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::VaultSeed,
        Slot::Transactions,
        Slot::Recurring,
        Slot::Budgets,
        Slot::Categories,
        Slot::Preferences,
        Slot::SmsDetection,
    ];

    /// The storage key for this slot
    pub const fn key(&self) -> &'static str {
        match self {
            Slot::VaultSeed => "app_vault_seed",
            Slot::Transactions => "budget_tracker_transactions",
            Slot::Recurring => "budget_tracker_recurring",
            Slot::Budgets => "budget_tracker_budgets",
            Slot::Categories => "budget_tracker_categories",
            Slot::Preferences => "budget_tracker_preferences",
            Slot::SmsDetection => "sms_detection_enabled",
        }
    }

    /// Whether values in this slot are sealed with the vault secret
    pub const fn is_encrypted(&self) -> bool {
        matches!(
            self,
            Slot::Transactions | Slot::Recurring | Slot::Budgets | Slot::Categories
        )
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A device-local key-value medium addressed by slot key
///
/// Writes overwrite unconditionally. Implementations make no attempt to
/// coordinate between processes.
pub trait SlotStore: Send + Sync {
    /// Read a slot, `None` if it was never written (or was removed)
    fn read(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Replace a slot's contents
    fn write(&self, key: &str, value: &str) -> LedgerResult<()>;

    /// Remove a slot, reporting whether it existed
    fn remove(&self, key: &str) -> LedgerResult<bool>;

    /// Remove every slot
    fn clear(&self) -> LedgerResult<()>;

    /// Keys of all slots currently holding a value
    fn keys(&self) -> LedgerResult<Vec<String>>;
}
