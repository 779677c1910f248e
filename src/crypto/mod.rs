//! Reversible column encryption
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is nonce-misuse
//! resistant and authenticated. Every decrypt either restores the exact
//! plaintext or fails with a [`crate::domain::CleanError::Decryption`];
//! there is no silent-corruption path.
//!
//! Key lifecycle is the caller's responsibility: keys are never written to
//! persistent storage or logs by this module.

pub mod cipher;
pub mod key;

pub use cipher::{CipherToken, ReversibleCipher};
pub use key::EncryptionKey;
