//! Helpers for pulling typed grower parameters out of a `serde_json::Value`.
//!
//! Missing keys and wrong types fall back to the supplied default. Range
//! checks happen later, when the grower validates its configuration.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only non-negative integers are accepted; `-1` or `2.5` yield the default.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}
