// Cleanframe - PII/PHI cleaning for tabular data
// Copyright (c) 2026 Cleanframe Contributors
// Licensed under the MIT License

//! # Cleanframe - PII/PHI cleaning for tabular data
//!
//! Cleanframe transforms table columns containing Personally Identifiable
//! Information (PII) or Protected Health Information (PHI) before the data
//! is shared, logged, or stored. Four strategies are supported:
//!
//! - **encrypt** - reversible, authenticated symmetric encryption; returns
//!   the key and a dtype record so the column can be restored exactly
//! - **faker** - substitution with synthetic values (names, emails, ...)
//! - **scrubadub** - detect-and-redact scrubbing of text content
//! - **truncate** - lossy truncation with a typed recast policy
//!
//! ## Architecture
//!
//! - [`accessor`] - the [`TableAccessor`] façade dispatching strategies
//! - [`domain`] - table/column/value models and the error type
//! - [`codec`] - value ⇄ string conversion with per-row type tags
//! - [`crypto`] - AES-256-GCM-SIV cipher and key lifecycle
//! - [`truncate`] - length-bounded truncation with recast
//! - [`synth`] - synthetic-data delegate
//! - [`scrub`] - detect-and-redact delegate
//! - [`audit`] - operation audit logging (digests, never plaintext)
//! - [`config`] - TOML configuration with env overrides
//! - [`logging`] - structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use cleanframe::accessor::{Strategy, TableAccessor};
//! use cleanframe::domain::{Column, Table, Value};
//!
//! # fn main() -> Result<(), cleanframe::domain::CleanError> {
//! let table = Table::from_columns(vec![Column::new(
//!     "ssn",
//!     vec![Value::from("555-55-5555"), Value::from("123-45-6789")],
//! )])?;
//!
//! let accessor = TableAccessor::new()?;
//!
//! // Reversible encryption: keep the key and dtype record to invert.
//! let (encrypted, key, dtype) = accessor.encrypt_column(&table, "ssn", None)?;
//! let restored = accessor.decrypt_column(&encrypted, "ssn", &key, &dtype)?;
//! assert_eq!(restored, table);
//! # Ok(())
//! # }
//! ```
//!
//! ## Key lifecycle
//!
//! Keys are never auto-persisted: serialize with
//! [`crypto::EncryptionKey::to_base64`] and store the result (plus the
//! dtype record) before the process ends, or the ciphertext is permanently
//! unrecoverable.
//!
//! ## Error Handling
//!
//! All operations return [`domain::CleanError`]. Integrity failures on the
//! decrypt path (authentication, type restoration) always raise; truncation
//! that cannot recast is a defined alternate outcome, not an error.

pub mod accessor;
pub mod audit;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod logging;
pub mod scrub;
pub mod synth;
pub mod truncate;

pub use accessor::{Applied, ColumnRequest, Strategy, TableAccessor};
pub use codec::DtypeRecord;
pub use crypto::EncryptionKey;
pub use domain::{CleanError, Column, Result, Table, TypeTag, Value};
