//! Device-local vault secret
//!
//! The ledger encrypts every sensitive slot with one random 256-bit key
//! generated on first use and stored, base64 encoded, in the vault seed slot.
//! There is no passphrase and no rotation: losing or replacing the seed makes
//! every existing blob unreadable.

use std::fmt;
use std::sync::Arc;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{LedgerError, LedgerResult};
use crate::storage::slots::{Slot, SlotStore};

/// Size of the AES-256 key in bytes
pub const SECRET_LEN: usize = 32;

/// The symmetric key protecting all encrypted slots
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bytes: [u8; SECRET_LEN],
}

impl Secret {
    /// Generate a fresh key from the OS random source
    pub(crate) fn generate() -> Self {
        let mut bytes = [0u8; SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub(crate) fn from_bytes(bytes: [u8; SECRET_LEN]) -> Self {
        Self { bytes }
    }

    pub(crate) fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.bytes
    }

    /// Storage encoding of the key
    fn encode(&self) -> String {
        STANDARD.encode(self.bytes)
    }

    fn decode(encoded: &str) -> LedgerResult<Self> {
        let mut raw = STANDARD
            .decode(encoded.trim())
            .map_err(|e| LedgerError::KeyMaterial(format!("Invalid seed encoding: {}", e)))?;

        if raw.len() != SECRET_LEN {
            let len = raw.len();
            raw.zeroize();
            return Err(LedgerError::KeyMaterial(format!(
                "Invalid seed length: expected {} bytes, got {}",
                SECRET_LEN, len
            )));
        }

        let mut bytes = [0u8; SECRET_LEN];
        bytes.copy_from_slice(&raw);
        raw.zeroize();
        Ok(Self { bytes })
    }
}

// Never print key material
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// Owns the vault seed slot
///
/// Construct once per process and share it (via `Arc`) with every
/// [`CipherCodec`](super::CipherCodec).
pub struct KeyManager {
    store: Arc<dyn SlotStore>,
}

impl KeyManager {
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self { store }
    }

    /// Return the installation's secret, creating and persisting it on first use
    ///
    /// The seed slot is read on every call. An absent or blank seed means a
    /// first run. A seed that is present but undecodable is a
    /// [`LedgerError::KeyMaterial`] error and is never silently replaced.
    pub fn get_or_create_secret(&self) -> LedgerResult<Secret> {
        let key = Slot::VaultSeed.key();

        match self.store.read(key)? {
            Some(encoded) if !encoded.trim().is_empty() => Secret::decode(&encoded),
            _ => {
                let secret = Secret::generate();
                self.store.write(key, &secret.encode())?;
                info!("generated new vault secret");
                Ok(secret)
            }
        }
    }

    /// Whether a seed has been persisted yet
    pub fn has_secret(&self) -> LedgerResult<bool> {
        Ok(self
            .store
            .read(Slot::VaultSeed.key())?
            .is_some_and(|s| !s.trim().is_empty()))
    }
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlotStore;

    fn manager() -> (Arc<MemorySlotStore>, KeyManager) {
        let store = Arc::new(MemorySlotStore::new());
        let manager = KeyManager::new(store.clone());
        (store, manager)
    }

    #[test]
    fn test_first_use_generates_and_persists() {
        let (store, manager) = manager();
        assert!(!manager.has_secret().unwrap());

        let secret = manager.get_or_create_secret().unwrap();

        let stored = store.read(Slot::VaultSeed.key()).unwrap().unwrap();
        assert_eq!(STANDARD.decode(stored).unwrap(), secret.as_bytes().to_vec());
        assert!(manager.has_secret().unwrap());
    }

    #[test]
    fn test_key_persists_across_calls() {
        let (_store, manager) = manager();
        let first = manager.get_or_create_secret().unwrap();
        let second = manager.get_or_create_secret().unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_key_persists_across_managers() {
        let (store, manager) = manager();
        let first = manager.get_or_create_secret().unwrap();

        let other = KeyManager::new(store);
        assert_eq!(
            first.as_bytes(),
            other.get_or_create_secret().unwrap().as_bytes()
        );
    }

    #[test]
    fn test_fresh_installations_get_different_keys() {
        let (_a, first) = manager();
        let (_b, second) = manager();
        assert_ne!(
            first.get_or_create_secret().unwrap().as_bytes(),
            second.get_or_create_secret().unwrap().as_bytes()
        );
    }

    #[test]
    fn test_blank_seed_is_treated_as_first_run() {
        let (store, manager) = manager();
        store.write(Slot::VaultSeed.key(), "").unwrap();

        manager.get_or_create_secret().unwrap();
        assert!(manager.has_secret().unwrap());
    }

    #[test]
    fn test_malformed_seed_is_an_error() {
        let (store, manager) = manager();
        store.write(Slot::VaultSeed.key(), "***not base64***").unwrap();

        let err = manager.get_or_create_secret().unwrap_err();
        assert!(matches!(err, LedgerError::KeyMaterial(_)));
        // The bad seed is left alone
        assert_eq!(
            store.read(Slot::VaultSeed.key()).unwrap().as_deref(),
            Some("***not base64***")
        );
    }

    #[test]
    fn test_wrong_length_seed_is_an_error() {
        let (store, manager) = manager();
        store
            .write(Slot::VaultSeed.key(), &STANDARD.encode([7u8; 16]))
            .unwrap();

        assert!(matches!(
            manager.get_or_create_secret(),
            Err(LedgerError::KeyMaterial(_))
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::from_bytes([0x41; SECRET_LEN]);
        let debug = format!("{:?}", secret);
        assert_eq!(debug, "Secret([REDACTED])");
    }
}
