//! Plain-text slots: display preferences and the SMS-detection flag

use std::sync::Arc;

use tracing::warn;

use crate::error::LedgerResult;
use crate::models::UserPreferences;

use super::slots::{Slot, SlotStore};

/// Unencrypted storage for [`UserPreferences`] and the SMS flag
pub struct PreferencesStore {
    store: Arc<dyn SlotStore>,
}

impl PreferencesStore {
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self { store }
    }

    /// Load preferences, using defaults if absent or unparseable
    pub fn load(&self) -> LedgerResult<UserPreferences> {
        match self.store.read(Slot::Preferences.key())? {
            Some(json) if !json.is_empty() => match serde_json::from_str(&json) {
                Ok(prefs) => Ok(prefs),
                Err(e) => {
                    warn!(error = %e, "preferences unreadable, using defaults");
                    Ok(UserPreferences::default())
                }
            },
            _ => Ok(UserPreferences::default()),
        }
    }

    pub fn save(&self, prefs: &UserPreferences) -> LedgerResult<()> {
        let json = serde_json::to_string(prefs)?;
        self.store.write(Slot::Preferences.key(), &json)
    }

    /// Whether SMS detection is switched on (off unless stored as `"true"`)
    pub fn sms_detection(&self) -> LedgerResult<bool> {
        Ok(self
            .store
            .read(Slot::SmsDetection.key())?
            .is_some_and(|value| value.trim() == "true"))
    }

    pub fn set_sms_detection(&self, enabled: bool) -> LedgerResult<()> {
        self.store
            .write(Slot::SmsDetection.key(), if enabled { "true" } else { "false" })
    }
}
