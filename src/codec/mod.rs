//! Type codec for reversible value transformations
//!
//! Encryption operates on byte strings, so heterogeneous column values are
//! first converted to a canonical string form together with a [`TypeTag`]
//! recording the original variant. The tag always wins when a string could
//! parse as multiple types ("123" is both a valid integer and valid text);
//! decoding never falls back to trial-and-error casts.
//!
//! Float values use Rust's `Display`, which prints the shortest
//! representation that parses back to the identical bits, so the
//! encode/decode pair is lossless for every supported variant.

use crate::domain::{CleanError, Result, TypeTag, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Convert a value to its canonical string form plus type tag
///
/// `Null` encodes as the empty string with tag [`TypeTag::Null`]; the tag,
/// not the string, is what identifies the missing value on the way back.
pub fn encode(value: &Value) -> (String, TypeTag) {
    (value.to_string(), value.type_tag())
}

/// Reconstruct a value from its string form and recorded tag
///
/// # Errors
///
/// Returns [`CleanError::TypeConversion`] when the string cannot be parsed
/// into the tagged type. Failures are surfaced, never silently coerced.
pub fn decode(repr: &str, tag: TypeTag) -> Result<Value> {
    match tag {
        TypeTag::Int => repr
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| CleanError::TypeConversion(format!("'{repr}' is not an integer: {e}"))),
        TypeTag::Float => repr
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| CleanError::TypeConversion(format!("'{repr}' is not a float: {e}"))),
        TypeTag::Text => Ok(Value::Text(repr.to_string())),
        TypeTag::Bool => repr
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|e| CleanError::TypeConversion(format!("'{repr}' is not a boolean: {e}"))),
        TypeTag::Null => Ok(Value::Null),
    }
}

/// Per-row type metadata produced alongside an encrypted column
///
/// Created at encryption time and consumed at decryption time; the caller
/// must retain it (serde round-trips via JSON) together with the key or the
/// original variants cannot be restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtypeRecord {
    /// Name of the column the record describes
    pub column: String,
    /// One tag per row, in row order
    pub tags: Vec<TypeTag>,
    /// When the record was produced
    pub created_at: DateTime<Utc>,
}

impl DtypeRecord {
    /// Record the per-row tags of a column's values
    pub fn capture(column: impl Into<String>, values: &[Value]) -> Self {
        Self {
            column: column.into(),
            tags: values.iter().map(Value::type_tag).collect(),
            created_at: Utc::now(),
        }
    }

    /// Number of rows described by this record
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the record describes zero rows
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Value::Int(42) ; "int")]
    #[test_case(Value::Int(-7) ; "negative int")]
    #[test_case(Value::Float(0.1) ; "float")]
    #[test_case(Value::Float(-1234.5678) ; "negative float")]
    #[test_case(Value::Text("123-45-6789".to_string()) ; "text")]
    #[test_case(Value::Text(String::new()) ; "empty text")]
    #[test_case(Value::Bool(true) ; "bool true")]
    #[test_case(Value::Bool(false) ; "bool false")]
    #[test_case(Value::Null ; "null")]
    fn test_encode_decode_round_trip(value: Value) {
        let (repr, tag) = encode(&value);
        let decoded = decode(&repr, tag).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_recorded_tag_wins_over_numeric_looking_text() {
        // "123" parses as an integer, but a Text tag must restore text.
        let decoded = decode("123", TypeTag::Text).unwrap();
        assert_eq!(decoded, Value::Text("123".to_string()));
    }

    #[test]
    fn test_decode_failure_is_type_conversion_error() {
        let err = decode("not-a-number", TypeTag::Int).unwrap_err();
        assert!(matches!(err, CleanError::TypeConversion(_)));

        let err = decode("maybe", TypeTag::Bool).unwrap_err();
        assert!(matches!(err, CleanError::TypeConversion(_)));
    }

    #[test]
    fn test_null_decodes_regardless_of_repr() {
        assert_eq!(decode("", TypeTag::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_dtype_record_captures_per_row_tags() {
        let values = vec![
            Value::Int(1),
            Value::Text("a".to_string()),
            Value::Null,
            Value::Bool(false),
        ];
        let record = DtypeRecord::capture("mixed", &values);
        assert_eq!(record.column, "mixed");
        assert_eq!(
            record.tags,
            vec![TypeTag::Int, TypeTag::Text, TypeTag::Null, TypeTag::Bool]
        );
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_dtype_record_serde_round_trip() {
        let record = DtypeRecord::capture("ssn", &[Value::from("555-55-5555")]);
        let json = serde_json::to_string(&record).unwrap();
        let restored: DtypeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }
}
