//! Configuration management
//!
//! A single TOML file configures logging, audit output, and an optional
//! custom pattern library for the scrub strategy. Environment variables
//! prefixed `CLEANFRAME_` override file values.

use crate::domain::{CleanError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level library configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,

    /// Path to a custom scrub pattern library TOML file
    pub pattern_library: Option<PathBuf>,
}

impl CleanConfig {
    /// Load configuration from a TOML file, applying env overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CleanError::Configuration(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let mut config: CleanConfig = toml::from_str(&content)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(CleanError::Configuration(format!(
                    "Pattern library file not found: {}",
                    path.display()
                )));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(CleanError::Configuration(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                )));
            }
        }

        self.audit
            .validate()
            .map_err(|e| CleanError::Configuration(format!("Invalid audit configuration: {e}")))?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CLEANFRAME_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("CLEANFRAME_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }
        self.audit.apply_env_overrides()?;
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/cleanframe.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.enabled {
            if let Some(parent) = self.log_path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!(
                            "Failed to create audit log directory: {}",
                            parent.display()
                        )
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CLEANFRAME_AUDIT_ENABLED") {
            self.enabled = val.parse().map_err(|_| {
                CleanError::Configuration("Invalid CLEANFRAME_AUDIT_ENABLED value".to_string())
            })?;
        }
        if let Ok(val) = std::env::var("CLEANFRAME_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("CLEANFRAME_AUDIT_JSON_FORMAT") {
            self.json_format = val.parse().map_err(|_| {
                CleanError::Configuration("Invalid CLEANFRAME_AUDIT_JSON_FORMAT value".to_string())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleanConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.local_enabled);
        assert!(!config.audit.enabled);
        assert!(config.audit.json_format);
        assert!(config.pattern_library.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        let config = CleanConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: CleanConfig = toml::from_str(
            r#"
            [logging]
            level = "debug"

            [audit]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.audit.enabled);
    }

    #[test]
    fn test_missing_pattern_library_rejected() {
        let config = CleanConfig {
            pattern_library: Some(PathBuf::from("/nonexistent/patterns.toml")),
            ..CleanConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CleanError::Configuration(_))
        ));
    }
}
