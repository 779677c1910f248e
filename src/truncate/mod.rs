//! Lossy, length-bounded truncation
//!
//! Truncation converts a value to its codec string form, keeps the first or
//! last `max_length` characters, then attempts to recast the shortened
//! string to the value's original type. Truncation that does not actually
//! shorten the value is treated as a failure and produces the absent
//! marker, never a pass-through of the original.

use crate::codec;
use crate::domain::Value;

/// Outcome of truncating a single value
#[derive(Debug, Clone, PartialEq)]
pub enum TruncationResult {
    /// The truncated string parsed back into the value's original type
    Typed(Value),
    /// Recasting failed; the truncated string is the result (an expected
    /// outcome, not an error)
    Text(String),
    /// Truncation had no shortening effect; the value is dropped
    Absent,
}

impl TruncationResult {
    /// Materialize the result as a column value, mapping `Absent` to null
    pub fn into_value(self) -> Value {
        match self {
            TruncationResult::Typed(v) => v,
            TruncationResult::Text(s) => Value::Text(s),
            TruncationResult::Absent => Value::Null,
        }
    }
}

/// Truncate a value to at most `max_length` characters
///
/// With `from_end` set, the last `max_length` characters are retained;
/// otherwise the first. Lengths are counted in characters, not bytes.
///
/// The result is [`TruncationResult::Absent`] whenever the truncated string
/// is not strictly shorter than the original string form (including
/// `max_length >= len`). Otherwise the truncated string is recast to the
/// value's original type tag: [`TruncationResult::Typed`] on success,
/// [`TruncationResult::Text`] on parse failure.
pub fn truncate(value: &Value, max_length: usize, from_end: bool) -> TruncationResult {
    let (repr, tag) = codec::encode(value);
    let total = repr.chars().count();

    if max_length >= total {
        return TruncationResult::Absent;
    }

    let truncated: String = if from_end {
        repr.chars().skip(total - max_length).collect()
    } else {
        repr.chars().take(max_length).collect()
    };

    match codec::decode(&truncated, tag) {
        Ok(recast) => TruncationResult::Typed(recast),
        Err(_) => TruncationResult::Text(truncated),
    }
}
