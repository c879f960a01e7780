//! Environment variable helpers for the stack configuration.
//!
//! Only the two shapes `config` needs: a parsed value with a default, and a
//! boolean switch.

use std::str::FromStr;

/// Read `key` parsed as `T`, or return `default` when unset or unparsable.
#[inline]
pub(crate) fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read `key` as a boolean switch.
///
/// `"1"`, `"true"`, `"yes"`, `"on"` (any case) are true, any other value is
/// false. Unset returns `default`.
#[inline]
pub(crate) fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
