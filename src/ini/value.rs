//! Typed interpretation of values
//!
//! Values are stored as text. These helpers coerce them on demand, failing with the
//! matching `Not*` error and carrying the offending text.

use crate::ini::error::{IniError, Result};

const TRUE_WORDS: [&str; 4] = ["true", "yes", "on", "1"];
const FALSE_WORDS: [&str; 4] = ["false", "no", "off", "0"];

/// Case-insensitive `true/yes/on/1` or `false/no/off/0`.
pub fn parse_bool(raw: &str) -> Result<bool> {
    let text = raw.trim();
    if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) {
        Ok(true)
    } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) {
        Ok(false)
    } else {
        Err(IniError::NotBoolean(raw.to_string()))
    }
}

/// Signed 64-bit integer, decimal or with a `0x`, `0o` or `0b` prefix.
pub fn parse_int(raw: &str) -> Result<i64> {
    let not_integer = || IniError::NotInteger(raw.to_string());
    let text = raw.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        Some("0o") | Some("0O") => (8, &unsigned[2..]),
        Some("0b") | Some("0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    // from_str_radix would accept a second sign
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(not_integer());
    }
    let magnitude = i128::from_str_radix(digits, radix).map_err(|_| not_integer())?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| not_integer())
}

/// 64-bit float in Rust's standard float syntax.
pub fn parse_float(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| IniError::NotFloat(raw.to_string()))
}
