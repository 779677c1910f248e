//! AES-256-GCM-SIV encryption and decryption of individual column values
//!
//! Each value is encrypted independently with a fresh random 96-bit nonce,
//! so no value learns anything from another's plaintext or ciphertext and
//! row order is preserved 1:1. The AEAD authentication tag makes tampering
//! and key mismatch deterministically detectable at decrypt time.

use crate::crypto::key::EncryptionKey;
use crate::domain::{CleanError, Result};
use aes_gcm_siv::{
    aead::{Aead, KeyInit},
    Aes256GcmSiv, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Prefix that appears at the start of every token's string form.
pub const VERSION_PREFIX: &str = "v1";

/// The opaque encrypted representation of one column value
///
/// The canonical string form is
/// `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherToken {
    /// Raw nonce bytes
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for CipherToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl FromStr for CipherToken {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CleanError::Decryption(format!(
                "Malformed token: expected '{VERSION_PREFIX}.<nonce>.<ciphertext>'"
            )));
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| CleanError::Decryption("Malformed token nonce".to_string()))?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CleanError::Decryption(format!(
                "Invalid nonce length: expected {NONCE_LEN} bytes"
            )));
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| CleanError::Decryption("Malformed token ciphertext".to_string()))?;

        Ok(Self { nonce, ciphertext })
    }
}

/// Authenticated symmetric cipher over sequences of string representations
///
/// Wraps AES-256-GCM-SIV bound to a single [`EncryptionKey`]. Encryption
/// consumes the codec's string form of each value; decryption restores it
/// or fails loudly, never returning corrupted plaintext.
pub struct ReversibleCipher {
    cipher: Aes256GcmSiv,
}

impl ReversibleCipher {
    /// Build a cipher bound to the given key
    pub fn new(key: &EncryptionKey) -> Self {
        let key = Key::<Aes256GcmSiv>::from_slice(key.expose_bytes());
        Self {
            cipher: Aes256GcmSiv::new(key),
        }
    }

    /// Encrypt a single string representation into an opaque token
    ///
    /// A fresh random nonce is generated per call via the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Decryption`] only on an internal AEAD failure,
    /// which is unreachable with a valid key and nonce.
    pub fn encrypt_value(&self, plaintext: &str) -> Result<CipherToken> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CleanError::Decryption("AEAD encryption failed".to_string()))?;

        Ok(CipherToken {
            nonce: nonce_bytes,
            ciphertext,
        })
    }

    /// Encrypt a sequence of string representations, preserving row order
    pub fn encrypt_all(&self, plaintexts: &[String]) -> Result<Vec<CipherToken>> {
        plaintexts
            .iter()
            .map(|p| self.encrypt_value(p))
            .collect()
    }

    /// Decrypt a token back into the string representation it was built from
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Decryption`] when authentication fails: the
    /// token was tampered with or was produced under a different key.
    pub fn decrypt_value(&self, token: &CipherToken) -> Result<String> {
        let nonce = Nonce::from_slice(&token.nonce);
        let plaintext = self
            .cipher
            .decrypt(nonce, token.ciphertext.as_ref())
            .map_err(|_| {
                CleanError::Decryption(
                    "Authentication failed: wrong key or tampered token".to_string(),
                )
            })?;

        String::from_utf8(plaintext)
            .map_err(|_| CleanError::Decryption("Decrypted payload is not valid UTF-8".to_string()))
    }

    /// Decrypt a sequence of tokens, preserving row order
    ///
    /// Fails on the first token that does not authenticate.
    pub fn decrypt_all(&self, tokens: &[CipherToken]) -> Result<Vec<String>> {
        tokens.iter().map(|t| self.decrypt_value(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = EncryptionKey::generate();
        let cipher = ReversibleCipher::new(&key);

        let token = cipher.encrypt_value("123-45-6789").unwrap();
        let decrypted = cipher.decrypt_value(&token).unwrap();
        assert_eq!(decrypted, "123-45-6789");
    }

    #[test]
    fn test_wrong_key_fails_decryption() {
        let cipher = ReversibleCipher::new(&EncryptionKey::generate());
        let other = ReversibleCipher::new(&EncryptionKey::generate());

        let token = cipher.encrypt_value("secret").unwrap();
        let err = other.decrypt_value(&token).unwrap_err();
        assert!(matches!(err, CleanError::Decryption(_)));
    }

    #[test]
    fn test_tampered_ciphertext_fails_auth() {
        let key = EncryptionKey::generate();
        let cipher = ReversibleCipher::new(&key);

        let mut token = cipher.encrypt_value("tamper me").unwrap();
        token.ciphertext[0] ^= 0xFF;
        assert!(cipher.decrypt_value(&token).is_err());
    }

    #[test]
    fn test_values_encrypt_independently() {
        let key = EncryptionKey::generate();
        let cipher = ReversibleCipher::new(&key);

        let tokens = cipher
            .encrypt_all(&["same".to_string(), "same".to_string()])
            .unwrap();

        // Fresh nonce per value: identical plaintexts yield distinct tokens.
        assert_ne!(tokens[0], tokens[1]);

        let decrypted = cipher.decrypt_all(&tokens).unwrap();
        assert_eq!(decrypted, vec!["same".to_string(), "same".to_string()]);
    }

    #[test]
    fn test_token_string_round_trip() {
        let key = EncryptionKey::generate();
        let cipher = ReversibleCipher::new(&key);

        let token = cipher.encrypt_value("hello").unwrap();
        let repr = token.to_string();
        assert!(repr.starts_with("v1."));

        let parsed: CipherToken = repr.parse().unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_parse_rejects_bad_prefix() {
        assert!("v2.abc.def".parse::<CipherToken>().is_err());
    }

    #[test]
    fn test_parse_rejects_too_few_parts() {
        assert!("v1.abc".parse::<CipherToken>().is_err());
    }

    #[test]
    fn test_parse_rejects_bad_base64() {
        assert!("v1.!!!.abc".parse::<CipherToken>().is_err());
    }

    #[test]
    fn test_empty_plaintext_round_trips() {
        let key = EncryptionKey::generate();
        let cipher = ReversibleCipher::new(&key);

        let token = cipher.encrypt_value("").unwrap();
        assert_eq!(cipher.decrypt_value(&token).unwrap(), "");
    }
}
