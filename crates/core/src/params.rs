//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! Numeric, boolean and string helpers are lenient: a missing key or a value
//! of the wrong JSON type yields the default. Colors are the exception. A
//! string that is present but not a valid hex color is an error, since
//! silently painting with the default hides a typo.

use serde_json::Value;

use crate::color::Srgb;
use crate::error::EngineError;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds for non-negative integers.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a hex color from `params[name]`.
///
/// Missing or non-string values yield `default`; a string that fails to parse
/// returns `EngineError::InvalidColor`.
pub fn param_color(params: &Value, name: &str, default: Srgb) -> Result<Srgb, EngineError> {
    match params.get(name).and_then(Value::as_str) {
        Some(hex) => Srgb::from_hex(hex),
        None => Ok(default),
    }
}
