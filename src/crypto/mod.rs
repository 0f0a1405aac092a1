//! Cryptographic functions for Pocket Ledger
//!
//! Provides AES-256-GCM sealing of slot payloads under a device-local,
//! randomly generated key.

pub mod encryption;
pub mod key_manager;

pub use encryption::{CipherCodec, OpenFailure, Opened, FALLBACK_TEXT, NONCE_SIZE, TAG_SIZE};
pub use key_manager::{KeyManager, Secret, SECRET_LEN};
