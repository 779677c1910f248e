//! Pattern library for PII detection

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// PII category a detection pattern maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrubCategory {
    Ssn,
    Email,
    Phone,
    IpAddress,
    Url,
    Date,
}

impl ScrubCategory {
    /// Placeholder label substituted for detected spans
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ssn => "SSN",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::IpAddress => "IP_ADDRESS",
            Self::Url => "URL",
            Self::Date => "DATE",
        }
    }

    fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "SSN" => Ok(Self::Ssn),
            "EMAIL" => Ok(Self::Email),
            "PHONE" => Ok(Self::Phone),
            "IP_ADDRESS" => Ok(Self::IpAddress),
            "URL" => Ok(Self::Url),
            "DATE" => Ok(Self::Date),
            _ => anyhow::bail!("Unknown scrub category: {s}"),
        }
    }
}

impl fmt::Display for ScrubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct PatternDefinition {
    /// Regex patterns for this category
    patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    confidence: f32,
    /// Category label
    category: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// Category emitted on a match
    pub category: ScrubCategory,
    /// Confidence score
    pub confidence: f32,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: HashMap<String, PatternDefinition>,
}

/// Registry of compiled detection patterns
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut patterns = Vec::new();
        for (name, def) in library.patterns {
            let category = ScrubCategory::parse(&def.category).with_context(|| {
                format!("Invalid category in pattern '{}': {}", name, def.category)
            })?;

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str)
                    .with_context(|| format!("Invalid regex in pattern '{name}': {pattern_str}"))?;

                patterns.push(CompiledPattern {
                    regex,
                    category,
                    confidence: def.confidence,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// Create a registry with the built-in patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Get all patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }
}
