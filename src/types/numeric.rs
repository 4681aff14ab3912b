//! Parsing of text-encoded numeric fields.
//!
//! KIS transmits every number as a string. The payload types keep the raw
//! text; this module converts it on demand:
//!
//! - empty or whitespace-only text is `None`;
//! - a single leading `+` is accepted;
//! - values are parsed exactly into [`Decimal`], with no rounding;
//! - anything else is [`KisError::InvalidValue`].

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::KisError;

/// Parse a text-encoded wire field into a [`Decimal`].
pub fn parse_decimal(field: &'static str, value: &str) -> Result<Option<Decimal>, KisError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    Decimal::from_str(digits)
        .map(Some)
        .map_err(|_| KisError::InvalidValue {
            field,
            value: value.to_string(),
        })
}
