//! Input validation shared by the store and the console prompts.
//!
//! These are pure functions. Retry loops belong to whoever is collecting input.

use crate::roster::record::{EQUIPMENT_SEPARATOR, FIELD_SEPARATOR};
use crate::roster::{RosterError, RosterResult};

/// Parse a base-10 `i32`, tolerating surrounding whitespace and an optional sign.
/// Negative values are accepted; nothing is range-checked.
pub fn parse_whole_number(field: &'static str, input: &str) -> RosterResult<i32> {
    let trimmed = input.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| RosterError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

/// Trim free text the way every stored field is trimmed.
pub fn normalize_text(input: &str) -> String {
    input.trim().to_string()
}

/// Return the first store delimiter inside a single-value field, if any.
///
/// Such a value is still written as-is; the store has no escaping, so the caller
/// may want to warn that it will read back differently.
pub fn stray_delimiter(value: &str) -> Option<char> {
    value
        .chars()
        .find(|c| *c == FIELD_SEPARATOR || *c == EQUIPMENT_SEPARATOR)
}

/// Like [`stray_delimiter`] for the equipment field, where `|` is legitimate.
pub fn stray_field_separator(value: &str) -> Option<char> {
    value.chars().find(|c| *c == FIELD_SEPARATOR)
}
