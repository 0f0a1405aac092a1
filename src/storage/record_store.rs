//! Encrypted collections stored in a single slot
//!
//! A [`RecordStore`] owns one slot and a default value. The slot holds the
//! sealed JSON of the whole collection; every save rewrites it entirely.
//! Reads degrade instead of failing: a missing, undecryptable or unparseable
//! slot yields the default.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::crypto::{CipherCodec, OpenFailure, Opened};
use crate::error::LedgerResult;

use super::slots::{Slot, SlotStore};

/// Why a stored value was replaced by the default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryReason {
    /// The blob could not be decrypted or authenticated
    Decrypt(OpenFailure),
    /// The plaintext was not valid JSON for the collection
    Parse(String),
}

impl fmt::Display for RecoveryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryReason::Decrypt(failure) => write!(f, "decrypt failed: {}", failure),
            RecoveryReason::Parse(msg) => write!(f, "parse failed: {}", msg),
        }
    }
}

/// Where a loaded value came from
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    /// Decrypted and parsed from the slot
    Stored(T),
    /// The slot was empty; this is the default
    Missing(T),
    /// The slot held something unusable; this is the default
    Recovered { value: T, reason: RecoveryReason },
}

impl<T> Loaded<T> {
    pub fn into_inner(self) -> T {
        match self {
            Loaded::Stored(value) | Loaded::Missing(value) => value,
            Loaded::Recovered { value, .. } => value,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Loaded::Recovered { .. })
    }

    /// Short status line for diagnostics
    pub fn status(&self) -> String {
        match self {
            Loaded::Stored(_) => "readable".to_string(),
            Loaded::Missing(_) => "empty".to_string(),
            Loaded::Recovered { reason, .. } => format!("unreadable, using defaults ({})", reason),
        }
    }
}

/// A typed, encrypted collection living in one slot
pub struct RecordStore<T> {
    store: Arc<dyn SlotStore>,
    codec: CipherCodec,
    slot: Slot,
    default: fn() -> T,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn SlotStore>, codec: CipherCodec, slot: Slot, default: fn() -> T) -> Self {
        debug_assert!(slot.is_encrypted(), "{} is a plain-text slot", slot);
        Self {
            store,
            codec,
            slot,
            default,
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Load the collection, falling back to the default
    ///
    /// Only a failure of the medium itself is an error.
    pub fn load(&self) -> LedgerResult<T> {
        Ok(self.load_outcome()?.into_inner())
    }

    /// Load the collection and report whether the default was substituted
    pub fn load_outcome(&self) -> LedgerResult<Loaded<T>> {
        let blob = match self.store.read(self.slot.key())? {
            Some(blob) if !blob.is_empty() => blob,
            _ => return Ok(Loaded::Missing((self.default)())),
        };

        let reason = match self.codec.open(&blob) {
            Opened::Plaintext(text) => match serde_json::from_str(&text) {
                Ok(value) => return Ok(Loaded::Stored(value)),
                Err(e) => RecoveryReason::Parse(e.to_string()),
            },
            Opened::Fallback(failure) => RecoveryReason::Decrypt(failure),
        };

        warn!(slot = %self.slot, %reason, "using default for unreadable slot");
        Ok(Loaded::Recovered {
            value: (self.default)(),
            reason,
        })
    }

    /// Seal and write the collection, replacing whatever the slot held
    pub fn save(&self, value: &T) -> LedgerResult<()> {
        let json = serde_json::to_string(value)?;
        let blob = self.codec.seal(&json)?;
        self.store.write(self.slot.key(), &blob)?;
        debug!(slot = %self.slot, bytes = blob.len(), "saved collection");
        Ok(())
    }

    /// The sealed slot contents exactly as stored
    pub fn snapshot(&self) -> LedgerResult<Option<String>> {
        self.store.read(self.slot.key())
    }

    /// Put back contents taken with [`RecordStore::snapshot`]
    pub fn restore(&self, snapshot: Option<String>) -> LedgerResult<()> {
        match snapshot {
            Some(blob) => self.store.write(self.slot.key(), &blob),
            None => self.store.remove(self.slot.key()).map(|_| ()),
        }
    }

    /// Load, apply `f`, and save
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> LedgerResult<R> {
        let mut value = self.load()?;
        let result = f(&mut value);
        self.save(&value)?;
        Ok(result)
    }
}

impl<E> RecordStore<Vec<E>>
where
    E: Serialize + DeserializeOwned,
{
    /// Prepend a record (newest first)
    pub fn insert_front(&self, record: E) -> LedgerResult<()> {
        self.insert_many_front(vec![record])
    }

    /// Prepend several records, keeping their relative order
    pub fn insert_many_front(&self, records: Vec<E>) -> LedgerResult<()> {
        self.update(|items| {
            items.splice(0..0, records);
        })
    }

    /// Append a record
    pub fn push(&self, record: E) -> LedgerResult<()> {
        self.update(|items| items.push(record))
    }

    /// Remove every matching record, returning how many were removed
    ///
    /// Nothing is written when no record matches.
    pub fn remove_where(&self, pred: impl Fn(&E) -> bool) -> LedgerResult<usize> {
        let mut items = self.load()?;
        let before = items.len();
        items.retain(|item| !pred(item));
        let removed = before - items.len();
        if removed > 0 {
            self.save(&items)?;
        }
        Ok(removed)
    }

    /// Replace the first matching record, returning whether one matched
    pub fn replace_where(&self, pred: impl Fn(&E) -> bool, record: E) -> LedgerResult<bool> {
        let mut items = self.load()?;
        match items.iter().position(|item| pred(item)) {
            Some(index) => {
                items[index] = record;
                self.save(&items)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the first matching record or append it
    ///
    /// Returns `true` if an existing record was replaced.
    pub fn upsert_by(&self, pred: impl Fn(&E) -> bool, record: E) -> LedgerResult<bool> {
        self.update(|items| match items.iter().position(|item| pred(item)) {
            Some(index) => {
                items[index] = record;
                true
            }
            None => {
                items.push(record);
                false
            }
        })
    }
}

impl<T> fmt::Debug for RecordStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
