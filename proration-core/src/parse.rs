//! Lenient coercion of form text into numbers.
//!
//! Input fields are free text. Nothing here ever fails: text that does not
//! start with a number becomes zero, so every form state yields a result.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, warn};

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("leading integer pattern"));

/// Removes thousands separators.
fn normalize_number_input(s: &str) -> String {
    s.replace(',', "")
}

/// Reads the leading integer of `s`, ignoring thousands separators.
///
/// Anything after the digits is dropped (`"12.9"` reads as 12, `"1e5"` as 1).
/// Returns `None` when there is no leading integer or it does not fit in an
/// `i64`.
///
/// ```
/// use proration_core::parse::parse_integer;
///
/// assert_eq!(parse_integer("10,000"), Some(10000));
/// assert_eq!(parse_integer(" -3 "), Some(-3));
/// assert_eq!(parse_integer("12.9"), Some(12));
/// assert_eq!(parse_integer("abc"), None);
/// assert_eq!(parse_integer(""), None);
/// ```
pub fn parse_integer(s: &str) -> Option<i64> {
    let normalized = normalize_number_input(s);
    let Some(captures) = LEADING_INTEGER.captures(&normalized) else {
        if !normalized.trim().is_empty() {
            debug!(input = %s, "no leading integer; treating as empty");
        }
        return None;
    };

    let digits = &captures[1];
    if captures[0].len() < normalized.trim_end().len() {
        debug!(input = %s, kept = digits, "discarded trailing text after integer");
    }

    match digits.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(input = %s, "integer out of range: {}", e);
            None
        }
    }
}

/// Reads a yen amount from form text.
///
/// Same rules as [`parse_integer`], with empty or unreadable text and
/// negative values all coercing to zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use proration_core::parse::parse_amount;
///
/// assert_eq!(parse_amount("12,345,678"), Decimal::from(12_345_678));
/// assert_eq!(parse_amount(""), Decimal::ZERO);
/// assert_eq!(parse_amount("n/a"), Decimal::ZERO);
/// ```
pub fn parse_amount(s: &str) -> Decimal {
    match parse_integer(s) {
        Some(value) if value < 0 => {
            warn!(input = %s, "negative amount coerced to zero");
            Decimal::ZERO
        }
        Some(value) => Decimal::from(value),
        None => Decimal::ZERO,
    }
}
