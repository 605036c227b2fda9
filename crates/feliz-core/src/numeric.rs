//! Numeric coercion at the input boundary.
//!
//! Form fields arrive as raw text while the user is still typing. Every
//! value is funnelled through [`parse_numeric_or_zero`] so the engine only
//! ever sees finite numbers:
//! - leading whitespace is skipped
//! - the longest leading decimal literal is used (`"12abc"` -> 12)
//! - empty text, text without a numeric prefix, and values that overflow
//!   to infinity all become `0.0`

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest leading decimal literal, optionally signed, with an optional exponent
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("numeric prefix pattern is valid")
});

/// Parse user-entered text into a finite number, falling back to zero.
pub fn parse_numeric_or_zero(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let Some(prefix) = NUMERIC_PREFIX.find(trimmed) else {
        return 0.0;
    };

    prefix
        .as_str()
        .parse::<f64>()
        .map(sanitize)
        .unwrap_or(0.0)
}

/// Replace NaN and infinities with zero
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
