//! Audit logger for column cleaning operations
//!
//! Appends one entry per operation so runs can be correlated after the
//! fact. Cell values and key material are never written; the entry carries
//! a SHA-256 digest of the pre-transform column content instead.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    column: String,
    strategy: String,
    rows: usize,
    duration_ms: u64,
    /// SHA-256 over the column's encoded values (never plaintext cells)
    content_digest: String,
}

/// Audit logger for cleaning operations
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Log one column operation
    ///
    /// `encoded_values` is the column's pre-transform content in codec
    /// string form; only its digest is written.
    pub fn log_operation(
        &self,
        column: &str,
        strategy: &str,
        encoded_values: &[String],
        duration_ms: u64,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            column: column.to_string(),
            strategy: strategy.to_string(),
            rows: encoded_values.len(),
            duration_ms,
            content_digest: Self::digest(encoded_values),
        };

        self.write_entry(&entry)
    }

    /// SHA-256 digest over the encoded column content
    fn digest(encoded_values: &[String]) -> String {
        let mut hasher = Sha256::new();
        for value in encoded_values {
            hasher.update(value.as_bytes());
            hasher.update([0u8]); // value separator
        }
        let result = hasher.finalize();
        format!("{result:x}")
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Column: {} | Strategy: {} | Rows: {} | Time: {}ms | Digest: {}",
                entry.timestamp,
                entry.column,
                entry.strategy,
                entry.rows,
                entry.duration_ms,
                entry.content_digest
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}
