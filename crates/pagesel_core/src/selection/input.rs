//! Bulk "select N rows" input validation.
//!
//! Input is rejected here, before it can reach the selection store.

use crate::model::page::BulkCount;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message shown to users for any rejected bulk count.
pub const BULK_INPUT_MESSAGE: &str = "Please enter a valid number greater than 0.";

/// Rejected bulk-count input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkInputError {
    /// No value was entered.
    Missing,
    /// Value is not an integer.
    NotANumber(String),
    /// Value is an integer but not greater than zero.
    NotPositive(String),
}

impl BulkInputError {
    /// Diagnostic detail for logs; never includes more than the raw input.
    pub fn detail(&self) -> String {
        match self {
            Self::Missing => "bulk count missing".to_string(),
            Self::NotANumber(raw) => format!("bulk count `{raw}` is not a number"),
            Self::NotPositive(raw) => format!("bulk count `{raw}` is not greater than 0"),
        }
    }
}

impl Display for BulkInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(BULK_INPUT_MESSAGE)
    }
}

impl Error for BulkInputError {}

/// Parses a user-entered bulk count.
///
/// Accepts surrounding whitespace and a leading `+`. Rejects blank input,
/// fractional or non-numeric text, and values `<= 0`.
pub fn parse_bulk_count(input: Option<&str>) -> Result<BulkCount, BulkInputError> {
    let raw = match input.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(BulkInputError::Missing),
    };

    let value: i128 = raw
        .parse()
        .map_err(|_| BulkInputError::NotANumber(raw.to_string()))?;
    if value <= 0 {
        return Err(BulkInputError::NotPositive(raw.to_string()));
    }

    u64::try_from(value)
        .ok()
        .and_then(BulkCount::new)
        .ok_or_else(|| BulkInputError::NotANumber(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_bulk_count, BulkInputError, BULK_INPUT_MESSAGE};

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse_bulk_count(Some(" 50 ")).unwrap().get(), 50);
        assert_eq!(parse_bulk_count(Some("+3")).unwrap().get(), 3);
    }

    #[test]
    fn rejects_missing_and_blank_input() {
        assert_eq!(parse_bulk_count(None), Err(BulkInputError::Missing));
        assert_eq!(parse_bulk_count(Some("   ")), Err(BulkInputError::Missing));
    }

    #[test]
    fn rejects_non_positive_and_non_numeric_input() {
        assert_eq!(
            parse_bulk_count(Some("0")),
            Err(BulkInputError::NotPositive("0".to_string()))
        );
        assert_eq!(
            parse_bulk_count(Some("-4")),
            Err(BulkInputError::NotPositive("-4".to_string()))
        );
        assert_eq!(
            parse_bulk_count(Some("2.5")),
            Err(BulkInputError::NotANumber("2.5".to_string()))
        );
        assert!(matches!(
            parse_bulk_count(Some("99999999999999999999999")),
            Err(BulkInputError::NotANumber(_))
        ));
    }

    #[test]
    fn every_error_displays_user_message() {
        let err = parse_bulk_count(Some("abc")).unwrap_err();
        assert_eq!(err.to_string(), BULK_INPUT_MESSAGE);
        assert!(err.detail().contains("abc"));
    }
}
