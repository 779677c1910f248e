//! Table accessor façade
//!
//! [`TableAccessor`] binds the four cleaning strategies to a table: it
//! resolves the target column, dispatches the strategy, and returns a new
//! table, never mutating the input. The encryption path additionally
//! returns the key and dtype record required to invert the transformation.

use crate::audit::AuditLogger;
use crate::codec::{self, DtypeRecord};
use crate::config::CleanConfig;
use crate::crypto::{CipherToken, EncryptionKey, ReversibleCipher};
use crate::domain::{CleanError, Result, Table, Value};
use crate::scrub::{patterns::PatternRegistry, RegexScrubber, TextScrubber};
use crate::synth::{FakerKind, SyntheticGenerator};
use crate::truncate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Cleaning strategy for a single column
///
/// Checked exhaustively at compile time; parameters travel with the
/// variant. Serde uses an internal `strategy` tag so descriptors can be
/// read from configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    /// Reversible authenticated encryption; single-column only
    Encrypt,
    /// Synthetic-data substitution via the named provider
    Faker { provider: FakerKind },
    /// Detect-and-redact scrubbing of text content
    Scrubadub,
    /// Lossy truncation with typed recast
    Truncate { max_length: usize, from_end: bool },
}

impl Strategy {
    /// Strategy name as used in audit entries and logs
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Encrypt => "encrypt",
            Strategy::Faker { .. } => "faker",
            Strategy::Scrubadub => "scrubadub",
            Strategy::Truncate { .. } => "truncate",
        }
    }

    /// Validate strategy parameters, before any table access
    pub fn validate(&self) -> Result<()> {
        match self {
            Strategy::Truncate { max_length, .. } if *max_length == 0 => Err(
                CleanError::Configuration("Truncate max_length must be at least 1".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// One batch descriptor: a column name plus the strategy to apply to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRequest {
    /// Target column name
    pub column: String,
    /// Strategy and its parameters
    #[serde(flatten)]
    pub strategy: Strategy,
}

/// Result of a single-column [`TableAccessor::apply`] call
#[derive(Debug)]
pub enum Applied {
    /// A transformed table (faker, scrubadub, truncate)
    Table(Table),
    /// An encrypted table plus the artifacts required to invert it
    Encrypted {
        table: Table,
        key: EncryptionKey,
        dtype: DtypeRecord,
    },
}

impl Applied {
    /// The transformed table, discarding any encryption artifacts
    pub fn into_table(self) -> Table {
        match self {
            Applied::Table(table) => table,
            Applied::Encrypted { table, .. } => table,
        }
    }
}

/// Façade dispatching cleaning strategies against table columns
///
/// Holds no cross-call mutable state; an accessor behind an `Arc` can be
/// used from multiple threads.
pub struct TableAccessor {
    scrubber: Arc<dyn TextScrubber>,
    audit: Option<AuditLogger>,
}

impl TableAccessor {
    /// Create an accessor with the built-in scrub pattern library and no audit log
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Configuration`] if the built-in pattern
    /// library fails to compile.
    pub fn new() -> Result<Self> {
        let scrubber = RegexScrubber::new()
            .map_err(|e| CleanError::Configuration(format!("Failed to build scrubber: {e}")))?;
        Ok(Self {
            scrubber: Arc::new(scrubber),
            audit: None,
        })
    }

    /// Create an accessor wired from configuration
    ///
    /// Loads a custom pattern library when configured and attaches an audit
    /// logger when enabled.
    pub fn from_config(config: &CleanConfig) -> Result<Self> {
        let scrubber: Arc<dyn TextScrubber> = match config.pattern_library {
            Some(ref path) => {
                let registry = PatternRegistry::from_file(path).map_err(|e| {
                    CleanError::Configuration(format!("Failed to load pattern library: {e}"))
                })?;
                Arc::new(RegexScrubber::with_registry(registry))
            }
            None => Arc::new(RegexScrubber::new().map_err(|e| {
                CleanError::Configuration(format!("Failed to build scrubber: {e}"))
            })?),
        };

        let audit = if config.audit.enabled {
            Some(
                AuditLogger::new(
                    config.audit.log_path.clone(),
                    config.audit.json_format,
                    true,
                )
                .map_err(|e| {
                    CleanError::Configuration(format!("Failed to create audit logger: {e}"))
                })?,
            )
        } else {
            None
        };

        Ok(Self { scrubber, audit })
    }

    /// Replace the scrubbing engine
    pub fn with_scrubber(mut self, scrubber: Arc<dyn TextScrubber>) -> Self {
        self.scrubber = scrubber;
        self
    }

    /// Attach an audit logger
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Apply a strategy to a single column, returning a new table
    ///
    /// For [`Strategy::Encrypt`] the result carries a freshly generated key
    /// and the dtype record; for every other strategy it is just the table.
    ///
    /// # Errors
    ///
    /// - [`CleanError::Configuration`] for invalid strategy parameters
    /// - [`CleanError::ColumnNotFound`] when the column is missing
    /// - [`CleanError::Delegate`] when an external engine fails on a row
    pub fn apply(&self, table: &Table, column: &str, strategy: &Strategy) -> Result<Applied> {
        strategy.validate()?;

        match strategy {
            Strategy::Encrypt => {
                let (table, key, dtype) = self.encrypt_column(table, column, None)?;
                Ok(Applied::Encrypted { table, key, dtype })
            }
            Strategy::Faker { provider } => {
                Ok(Applied::Table(self.fake_column(table, column, *provider)?))
            }
            Strategy::Scrubadub => Ok(Applied::Table(self.scrub_column(table, column)?)),
            Strategy::Truncate {
                max_length,
                from_end,
            } => Ok(Applied::Table(self.truncate_column(
                table,
                column,
                *max_length,
                *from_end,
            )?)),
        }
    }

    /// Apply a batch of descriptors, one column each, composing one table
    ///
    /// Columns not named by any descriptor pass through structurally
    /// unchanged. The batch fails fast: every descriptor is validated
    /// (parameters, strategy, column existence) before any column is
    /// transformed, and the first failure aborts the whole call.
    ///
    /// [`Strategy::Encrypt`] is not supported in batches because its
    /// key/dtype outputs are single-column artifacts; such a descriptor is
    /// a [`CleanError::Configuration`] error.
    pub fn apply_many(&self, table: &Table, requests: &[ColumnRequest]) -> Result<Table> {
        for request in requests {
            if matches!(request.strategy, Strategy::Encrypt) {
                return Err(CleanError::Configuration(format!(
                    "Batch mode does not support the encrypt strategy (column '{}'); \
                     use encrypt_column for each column instead",
                    request.column
                )));
            }
            request.strategy.validate()?;
            table.require_column(&request.column)?;
        }

        let mut current = table.clone();
        for request in requests {
            current = self
                .apply(&current, &request.column, &request.strategy)?
                .into_table();
        }
        Ok(current)
    }

    /// Encrypt a column, returning the new table, the key, and the dtype record
    ///
    /// When `key` is `None` a fresh key is generated for this call. The key
    /// is never persisted or logged; the caller must externalize it (see
    /// [`EncryptionKey::to_base64`]) or the ciphertext is permanently
    /// unrecoverable.
    pub fn encrypt_column(
        &self,
        table: &Table,
        column: &str,
        key: Option<&EncryptionKey>,
    ) -> Result<(Table, EncryptionKey, DtypeRecord)> {
        let start = Instant::now();
        let target = table.require_column(column)?;

        let key = key.cloned().unwrap_or_else(EncryptionKey::generate);
        let cipher = ReversibleCipher::new(&key);

        let dtype = DtypeRecord::capture(column, target.values());
        let reprs: Vec<String> = target
            .values()
            .iter()
            .map(|v| codec::encode(v).0)
            .collect();

        let tokens = cipher.encrypt_all(&reprs)?;
        let cells = tokens
            .into_iter()
            .map(|t| Value::Text(t.to_string()))
            .collect();

        let result = table.with_column(column, cells)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(column, rows = reprs.len(), duration_ms, "encrypted column");
        self.log_audit(column, "encrypt", &reprs, duration_ms);

        Ok((result, key, dtype))
    }

    /// Decrypt a previously encrypted column back to its original values
    ///
    /// Requires the same key and the dtype record produced at encryption
    /// time.
    ///
    /// # Errors
    ///
    /// - [`CleanError::Decryption`] on malformed tokens, key mismatch, or
    ///   tampering
    /// - [`CleanError::TypeConversion`] when a decrypted string cannot be
    ///   restored to its recorded type
    ///
    /// Both always raise; a silent failure here would mean undetected data
    /// corruption.
    pub fn decrypt_column(
        &self,
        table: &Table,
        column: &str,
        key: &EncryptionKey,
        dtype: &DtypeRecord,
    ) -> Result<Table> {
        let start = Instant::now();
        let target = table.require_column(column)?;

        if dtype.len() != target.len() {
            return Err(CleanError::TypeConversion(format!(
                "Dtype record for '{}' describes {} rows, column has {}",
                dtype.column,
                dtype.len(),
                target.len()
            )));
        }

        let cipher = ReversibleCipher::new(key);
        let tokens: Vec<CipherToken> = target
            .values()
            .iter()
            .map(|v| match v {
                Value::Text(s) => s.parse(),
                other => Err(CleanError::Decryption(format!(
                    "Cell is not a cipher token: {other:?}"
                ))),
            })
            .collect::<Result<_>>()?;

        let reprs = cipher.decrypt_all(&tokens)?;
        let cells = reprs
            .iter()
            .zip(&dtype.tags)
            .map(|(repr, tag)| codec::decode(repr, *tag))
            .collect::<Result<Vec<Value>>>()?;

        let result = table.with_column(column, cells)?;

        debug!(
            column,
            rows = reprs.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "decrypted column"
        );

        Ok(result)
    }

    /// Replace a column with synthetic values from the given provider
    pub fn fake_column(&self, table: &Table, column: &str, provider: FakerKind) -> Result<Table> {
        let start = Instant::now();
        let target = table.require_column(column)?;

        let mut generator = SyntheticGenerator::new(provider);
        let cells = generator.generate_column(target.len());
        let result = table.with_column(column, cells)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            column,
            provider = %provider,
            rows = target.len(),
            duration_ms,
            "substituted synthetic values"
        );
        self.audit_original(column, "faker", target.values(), duration_ms);

        Ok(result)
    }

    /// Scrub detected PII from a column's text content
    ///
    /// Null cells pass through; other cells are scrubbed in their string
    /// form and become text when anything was detected, otherwise the
    /// original value is kept. An engine failure on a row aborts with
    /// [`CleanError::Delegate`] identifying that row.
    pub fn scrub_column(&self, table: &Table, column: &str) -> Result<Table> {
        let start = Instant::now();
        let target = table.require_column(column)?;

        let mut cells = Vec::with_capacity(target.len());
        for (row, value) in target.values().iter().enumerate() {
            if value.is_null() {
                cells.push(Value::Null);
                continue;
            }
            let (repr, _) = codec::encode(value);
            let scrubbed = self
                .scrubber
                .scrub(&repr)
                .map_err(|e| CleanError::Delegate {
                    column: column.to_string(),
                    row,
                    message: e.to_string(),
                })?;
            if scrubbed == repr {
                cells.push(value.clone());
            } else {
                cells.push(Value::Text(scrubbed));
            }
        }

        let result = table.with_column(column, cells)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(column, rows = target.len(), duration_ms, "scrubbed column");
        self.audit_original(column, "scrubadub", target.values(), duration_ms);

        Ok(result)
    }

    /// Truncate a column's values, recasting each to its original type
    ///
    /// Values the truncation cannot shorten become null (see
    /// [`crate::truncate::TruncationResult::Absent`]).
    pub fn truncate_column(
        &self,
        table: &Table,
        column: &str,
        max_length: usize,
        from_end: bool,
    ) -> Result<Table> {
        Strategy::Truncate {
            max_length,
            from_end,
        }
        .validate()?;

        let start = Instant::now();
        let target = table.require_column(column)?;

        let cells = target
            .values()
            .iter()
            .map(|v| truncate::truncate(v, max_length, from_end).into_value())
            .collect();

        let result = table.with_column(column, cells)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            column,
            max_length, from_end, duration_ms, "truncated column"
        );
        self.audit_original(column, "truncate", target.values(), duration_ms);

        Ok(result)
    }

    fn audit_original(&self, column: &str, strategy: &str, values: &[Value], duration_ms: u64) {
        if self.audit.is_some() {
            let reprs: Vec<String> = values.iter().map(|v| codec::encode(v).0).collect();
            self.log_audit(column, strategy, &reprs, duration_ms);
        }
    }

    fn log_audit(&self, column: &str, strategy: &str, reprs: &[String], duration_ms: u64) {
        if let Some(ref audit) = self.audit {
            if let Err(e) = audit.log_operation(column, strategy, reprs, duration_ms) {
                tracing::warn!(error = %e, column, "audit logging failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Column;

    fn ssn_table() -> Table {
        Table::from_columns(vec![
            Column::new(
                "ssn",
                vec![Value::from("555-55-5555"), Value::from("123-45-6789")],
            ),
            Column::new("age", vec![Value::Int(34), Value::Int(29)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_apply_unknown_column() {
        let accessor = TableAccessor::new().unwrap();
        let err = accessor
            .apply(&ssn_table(), "missing", &Strategy::Scrubadub)
            .unwrap_err();
        assert!(matches!(err, CleanError::ColumnNotFound(_)));
    }

    #[test]
    fn test_invalid_truncate_params_fail_before_column_lookup() {
        let accessor = TableAccessor::new().unwrap();
        // Bad params on a missing column: parameter validation wins.
        let err = accessor
            .apply(
                &ssn_table(),
                "missing",
                &Strategy::Truncate {
                    max_length: 0,
                    from_end: false,
                },
            )
            .unwrap_err();
        assert!(matches!(err, CleanError::Configuration(_)));
    }

    #[test]
    fn test_encrypt_returns_key_and_dtype() {
        let accessor = TableAccessor::new().unwrap();
        let table = ssn_table();

        let applied = accessor.apply(&table, "ssn", &Strategy::Encrypt).unwrap();
        let Applied::Encrypted {
            table: encrypted,
            key,
            dtype,
        } = applied
        else {
            panic!("expected encrypted outcome");
        };

        assert_eq!(dtype.column, "ssn");
        assert_eq!(dtype.len(), 2);
        // Ciphertext cells are opaque tokens, not the originals.
        for value in encrypted.column("ssn").unwrap().values() {
            let Value::Text(s) = value else {
                panic!("expected token text")
            };
            assert!(s.starts_with("v1."));
        }

        let decrypted = accessor
            .decrypt_column(&encrypted, "ssn", &key, &dtype)
            .unwrap();
        assert_eq!(decrypted, table);
    }

    #[test]
    fn test_decrypt_with_wrong_key_raises() {
        let accessor = TableAccessor::new().unwrap();
        let (encrypted, _key, dtype) = accessor
            .encrypt_column(&ssn_table(), "ssn", None)
            .unwrap();

        let wrong = EncryptionKey::generate();
        let err = accessor
            .decrypt_column(&encrypted, "ssn", &wrong, &dtype)
            .unwrap_err();
        assert!(matches!(err, CleanError::Decryption(_)));
    }

    #[test]
    fn test_decrypt_rejects_mismatched_dtype_length() {
        let accessor = TableAccessor::new().unwrap();
        let (encrypted, key, _) = accessor.encrypt_column(&ssn_table(), "ssn", None).unwrap();

        let short = DtypeRecord::capture("ssn", &[Value::from("only-one")]);
        let err = accessor
            .decrypt_column(&encrypted, "ssn", &key, &short)
            .unwrap_err();
        assert!(matches!(err, CleanError::TypeConversion(_)));
    }

    #[test]
    fn test_batch_rejects_encrypt() {
        let accessor = TableAccessor::new().unwrap();
        let requests = vec![ColumnRequest {
            column: "ssn".to_string(),
            strategy: Strategy::Encrypt,
        }];
        let err = accessor.apply_many(&ssn_table(), &requests).unwrap_err();
        assert!(matches!(err, CleanError::Configuration(_)));
    }

    #[test]
    fn test_batch_fails_fast_on_missing_column() {
        let accessor = TableAccessor::new().unwrap();
        let requests = vec![
            ColumnRequest {
                column: "ssn".to_string(),
                strategy: Strategy::Scrubadub,
            },
            ColumnRequest {
                column: "missing".to_string(),
                strategy: Strategy::Scrubadub,
            },
        ];
        let err = accessor.apply_many(&ssn_table(), &requests).unwrap_err();
        assert!(matches!(err, CleanError::ColumnNotFound(_)));
    }

    #[test]
    fn test_strategy_descriptor_serde() {
        let toml = r#"
            column = "ssn"
            strategy = "truncate"
            max_length = 4
            from_end = false
        "#;
        let request: ColumnRequest = toml::from_str(toml).unwrap();
        assert_eq!(request.column, "ssn");
        assert_eq!(
            request.strategy,
            Strategy::Truncate {
                max_length: 4,
                from_end: false
            }
        );
    }

    #[test]
    fn test_faker_descriptor_serde() {
        let json = r#"{"column":"name","strategy":"faker","provider":"first_name"}"#;
        let request: ColumnRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.strategy,
            Strategy::Faker {
                provider: FakerKind::FirstName
            }
        );
    }
}
