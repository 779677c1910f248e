//! Synthetic-data substitution delegate
//!
//! Thin adapter over the `fake` crate, which acts as the external
//! generator: a selector picks a provider from the catalog and every row is
//! substituted 1:1 by position with a freshly generated value. The catalog
//! and locale behavior belong to the collaborator, not to this module.

use crate::domain::{CleanError, Result, Value};
use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{FreeEmail, Username};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generator selector forwarded to the synthetic-data collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FakerKind {
    FirstName,
    LastName,
    FullName,
    Email,
    Username,
    PhoneNumber,
    City,
    Company,
}

impl FakerKind {
    /// Selector string as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            FakerKind::FirstName => "first_name",
            FakerKind::LastName => "last_name",
            FakerKind::FullName => "full_name",
            FakerKind::Email => "email",
            FakerKind::Username => "username",
            FakerKind::PhoneNumber => "phone_number",
            FakerKind::City => "city",
            FakerKind::Company => "company",
        }
    }
}

impl fmt::Display for FakerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FakerKind {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first_name" => Ok(FakerKind::FirstName),
            "last_name" => Ok(FakerKind::LastName),
            "full_name" | "name" => Ok(FakerKind::FullName),
            "email" => Ok(FakerKind::Email),
            "username" => Ok(FakerKind::Username),
            "phone_number" | "phone" => Ok(FakerKind::PhoneNumber),
            "city" => Ok(FakerKind::City),
            "company" => Ok(FakerKind::Company),
            _ => Err(CleanError::Configuration(format!(
                "Unknown faker provider: {s}"
            ))),
        }
    }
}

/// Stateful generator producing one substitute value per row
pub struct SyntheticGenerator {
    kind: FakerKind,
    rng: StdRng,
}

impl SyntheticGenerator {
    /// Create a generator for the given provider, seeded from entropy
    pub fn new(kind: FakerKind) -> Self {
        Self {
            kind,
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate one substitute value
    pub fn generate(&mut self) -> Value {
        let text: String = match self.kind {
            FakerKind::FirstName => FirstName().fake_with_rng(&mut self.rng),
            FakerKind::LastName => LastName().fake_with_rng(&mut self.rng),
            FakerKind::FullName => Name().fake_with_rng(&mut self.rng),
            FakerKind::Email => FreeEmail().fake_with_rng(&mut self.rng),
            FakerKind::Username => Username().fake_with_rng(&mut self.rng),
            FakerKind::PhoneNumber => PhoneNumber().fake_with_rng(&mut self.rng),
            FakerKind::City => CityName().fake_with_rng(&mut self.rng),
            FakerKind::Company => CompanyName().fake_with_rng(&mut self.rng),
        };
        Value::Text(text)
    }

    /// Generate a whole replacement column of `rows` substitute values
    pub fn generate_column(&mut self, rows: usize) -> Vec<Value> {
        (0..rows).map(|_| self.generate()).collect()
    }
}
