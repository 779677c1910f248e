//! Symmetric key lifecycle
//!
//! Keys are generated fresh per encryption call unless the caller supplies
//! one. The library never persists or logs key material; callers that need
//! ciphertext to survive the process must externalize the key themselves
//! via [`EncryptionKey::to_base64`] before the key is dropped.

use crate::domain::{CleanError, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, Secret};
use std::fmt;
use zeroize::Zeroize;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// A 256-bit symmetric encryption key
///
/// The material is held behind [`secrecy::Secret`], so it is zeroized on
/// drop and redacted from `Debug` output.
pub struct EncryptionKey {
    material: Secret<[u8; KEY_LEN]>,
}

impl EncryptionKey {
    /// Generate a fresh key from the OS CSPRNG
    ///
    /// Each call produces an unrelated key; reuse across processing
    /// sessions requires the caller to persist and reload it explicitly.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self {
            material: Secret::new(bytes),
        }
    }

    /// Build a key from raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Configuration`] if `bytes` is not [`KEY_LEN`]
    /// bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_LEN {
            return Err(CleanError::Configuration(format!(
                "Invalid key length: expected {KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut material = [0u8; KEY_LEN];
        material.copy_from_slice(bytes);
        Ok(Self {
            material: Secret::new(material),
        })
    }

    /// Serialize the key for external persistence (URL-safe base64, no padding)
    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.material.expose_secret())
    }

    /// Deserialize a key previously produced by [`Self::to_base64`]
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Configuration`] on malformed base64 or wrong
    /// decoded length.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let mut bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| CleanError::Configuration(format!("Invalid key encoding: {e}")))?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Raw key bytes for cipher construction (crate-internal)
    pub(crate) fn expose_bytes(&self) -> &[u8; KEY_LEN] {
        self.material.expose_secret()
    }
}

impl Clone for EncryptionKey {
    fn clone(&self) -> Self {
        Self {
            material: Secret::new(*self.material.expose_secret()),
        }
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}
