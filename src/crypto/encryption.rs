//! AES-256-GCM sealing of slot payloads
//!
//! A sealed blob is `base64(nonce[12] || ciphertext || tag[16])`. Each seal
//! draws a fresh random nonce. Opening never fails outright: any problem
//! yields [`Opened::Fallback`], whose text form is the empty JSON array.

use std::sync::Arc;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;
use tracing::warn;

use crate::error::{LedgerError, LedgerResult};

use super::key_manager::{KeyManager, Secret};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Text returned in place of a blob that cannot be opened
pub const FALLBACK_TEXT: &str = "[]";

/// Why a blob could not be opened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenFailure {
    #[error("vault secret unavailable: {0}")]
    KeyUnavailable(String),

    #[error("blob is not valid base64")]
    Encoding,

    #[error("blob too short: {0} bytes")]
    Truncated(usize),

    /// Wrong key, corrupted or tampered ciphertext
    #[error("authentication failed")]
    Authentication,

    #[error("decrypted payload is not UTF-8")]
    Utf8,
}

/// Result of opening a blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    Plaintext(String),
    Fallback(OpenFailure),
}

impl Opened {
    /// The recovered plaintext, or `"[]"` on failure
    pub fn into_text(self) -> String {
        match self {
            Opened::Plaintext(text) => text,
            Opened::Fallback(_) => FALLBACK_TEXT.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Opened::Fallback(_))
    }

    pub fn failure(&self) -> Option<&OpenFailure> {
        match self {
            Opened::Plaintext(_) => None,
            Opened::Fallback(failure) => Some(failure),
        }
    }
}

/// Encrypt bytes, returning `nonce || ciphertext`
pub(crate) fn encrypt(plaintext: &[u8], secret: &Secret) -> LedgerResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(secret.as_bytes())
        .map_err(|e| LedgerError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| LedgerError::Encryption(format!("Encryption failed: {}", e)))?;

    let mut bundle = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    bundle.extend_from_slice(&nonce_bytes);
    bundle.extend_from_slice(&ciphertext);
    Ok(bundle)
}

/// Decrypt a `nonce || ciphertext` bundle
pub(crate) fn decrypt(bundle: &[u8], secret: &Secret) -> Result<Vec<u8>, OpenFailure> {
    if bundle.len() < NONCE_SIZE + TAG_SIZE {
        return Err(OpenFailure::Truncated(bundle.len()));
    }

    let cipher =
        Aes256Gcm::new_from_slice(secret.as_bytes()).map_err(|_| OpenFailure::Authentication)?;

    let (nonce_bytes, ciphertext) = bundle.split_at(NONCE_SIZE);
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| OpenFailure::Authentication)
}

/// Seals and opens slot payloads with the installation secret
#[derive(Debug, Clone)]
pub struct CipherCodec {
    keys: Arc<KeyManager>,
}

impl CipherCodec {
    pub fn new(keys: Arc<KeyManager>) -> Self {
        Self { keys }
    }

    /// Encrypt `plaintext` into a transportable blob
    ///
    /// Fails only if the secret cannot be obtained or the cipher rejects the
    /// input; callers should treat that as a failed save.
    pub fn seal(&self, plaintext: &str) -> LedgerResult<String> {
        let secret = self.keys.get_or_create_secret()?;
        let bundle = encrypt(plaintext.as_bytes(), &secret)?;
        Ok(STANDARD.encode(bundle))
    }

    /// Decrypt and authenticate a blob
    pub fn open(&self, blob: &str) -> Opened {
        match self.try_open(blob) {
            Ok(text) => Opened::Plaintext(text),
            Err(failure) => {
                warn!(reason = %failure, "could not open sealed blob");
                Opened::Fallback(failure)
            }
        }
    }

    fn try_open(&self, blob: &str) -> Result<String, OpenFailure> {
        let secret = self
            .keys
            .get_or_create_secret()
            .map_err(|e| OpenFailure::KeyUnavailable(e.to_string()))?;

        let bundle = STANDARD
            .decode(blob.trim())
            .map_err(|_| OpenFailure::Encoding)?;

        let plaintext = decrypt(&bundle, &secret)?;
        String::from_utf8(plaintext).map_err(|_| OpenFailure::Utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::slots::{Slot, SlotStore};
    use crate::storage::MemorySlotStore;
    use std::collections::HashSet;

    fn codec() -> (Arc<MemorySlotStore>, CipherCodec) {
        let store = Arc::new(MemorySlotStore::new());
        let keys = Arc::new(KeyManager::new(store.clone()));
        (store, CipherCodec::new(keys))
    }

    #[test]
    fn test_seal_open_round_trip() {
        let (_store, codec) = codec();
        for plaintext in ["", "[]", "Hello, World!", "₹ 500 ünïcödé", r#"[{"id":"a1"}]"#] {
            let blob = codec.seal(plaintext).unwrap();
            assert_eq!(codec.open(&blob), Opened::Plaintext(plaintext.to_string()));
        }
    }

    #[test]
    fn test_large_plaintext() {
        let (_store, codec) = codec();
        let plaintext = "x".repeat(100_000);
        let blob = codec.seal(&plaintext).unwrap();
        assert_eq!(codec.open(&blob).into_text(), plaintext);
    }

    #[test]
    fn test_blob_layout() {
        let (_store, codec) = codec();
        let blob = codec.seal("abc").unwrap();
        let bundle = STANDARD.decode(&blob).unwrap();
        assert_eq!(bundle.len(), NONCE_SIZE + 3 + TAG_SIZE);
    }

    #[test]
    fn test_nonces_are_unique() {
        let (_store, codec) = codec();
        let mut nonces = HashSet::new();
        for _ in 0..500 {
            let bundle = STANDARD.decode(codec.seal("same").unwrap()).unwrap();
            assert!(nonces.insert(bundle[..NONCE_SIZE].to_vec()));
        }
    }

    #[test]
    fn test_any_flipped_ciphertext_bit_falls_back() {
        let (_store, codec) = codec();
        let blob = codec.seal(r#"[{"id":"a1"}]"#).unwrap();
        let bundle = STANDARD.decode(&blob).unwrap();

        for byte in NONCE_SIZE..bundle.len() {
            for bit in [0u8, 3, 7] {
                let mut tampered = bundle.clone();
                tampered[byte] ^= 1 << bit;
                let opened = codec.open(&STANDARD.encode(&tampered));
                assert_eq!(opened, Opened::Fallback(OpenFailure::Authentication));
                assert_eq!(opened.into_text(), FALLBACK_TEXT);
            }
        }
    }

    #[test]
    fn test_flipped_nonce_bit_falls_back() {
        let (_store, codec) = codec();
        let mut bundle = STANDARD.decode(codec.seal("data").unwrap()).unwrap();
        bundle[0] ^= 0x01;
        assert!(codec.open(&STANDARD.encode(&bundle)).is_fallback());
    }

    #[test]
    fn test_wrong_key_falls_back() {
        let (_a, first) = codec();
        let (_b, second) = codec();
        let blob = first.seal("secret data").unwrap();

        assert_eq!(
            second.open(&blob),
            Opened::Fallback(OpenFailure::Authentication)
        );
    }

    #[test]
    fn test_garbage_and_truncated_blobs_fall_back() {
        let (_store, codec) = codec();
        assert_eq!(
            codec.open("not base64 at all!"),
            Opened::Fallback(OpenFailure::Encoding)
        );
        assert_eq!(
            codec.open(&STANDARD.encode([1u8; 5])),
            Opened::Fallback(OpenFailure::Truncated(5))
        );
        assert_eq!(codec.open(""), Opened::Fallback(OpenFailure::Truncated(0)));
    }

    #[test]
    fn test_malformed_key_falls_back_on_open_and_errors_on_seal() {
        let (store, codec) = codec();
        let blob = codec.seal("data").unwrap();
        store.write(Slot::VaultSeed.key(), "%%%").unwrap();

        let opened = codec.open(&blob);
        assert!(matches!(
            opened.failure(),
            Some(OpenFailure::KeyUnavailable(_))
        ));
        assert!(matches!(
            codec.seal("data"),
            Err(LedgerError::KeyMaterial(_))
        ));
    }

    #[test]
    fn test_low_level_encrypt_decrypt() {
        let secret = Secret::from_bytes([9u8; 32]);
        let bundle = encrypt(b"payload", &secret).unwrap();
        assert_eq!(decrypt(&bundle, &secret).unwrap(), b"payload");

        let other = Secret::from_bytes([8u8; 32]);
        assert_eq!(decrypt(&bundle, &other), Err(OpenFailure::Authentication));
    }
}
