//! Key parsing at the text boundary.

use std::num::IntErrorKind;

use super::error::{DomainError, DomainResult};

/// Tree key type.
pub type Key = i64;

/// Parse user supplied text into a tree key.
///
/// Surrounding whitespace and a leading `+` are accepted. Anything that is
/// not a whole number inside the `i64` range is rejected with
/// [`DomainError::InvalidKey`].
pub fn parse_key(input: &str) -> DomainResult<Key> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_key(input, "empty input"));
    }

    trimmed.parse::<Key>().map_err(|e| {
        let reason = match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                "out of range for a 64-bit signed key"
            }
            _ => match trimmed.parse::<f64>() {
                Ok(f) if !f.is_finite() => "not a finite number",
                Ok(_) => "not an integer",
                Err(_) => "not a number",
            },
        };
        DomainError::invalid_key(input, reason)
    })
}
