//! Environment variable helpers
//!
//! Empty values are treated the same as unset ones. The `lookup_*` variants
//! read from any key/value source so loaders can be exercised without
//! touching the process environment.

use std::str::FromStr;
use tracing::warn;

/// Read a variable from the process environment
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read a non-empty, trimmed environment variable
pub fn env_string(key: &str) -> Option<String> {
    lookup_string(key, process_env)
}

/// Read a boolean flag (`1/0`, `true/false`, `yes/no`, `on/off`)
///
/// Unrecognised values yield `None` so callers keep their default.
pub fn env_flag(key: &str) -> Option<bool> {
    lookup_flag(key, process_env)
}

/// Read and parse an environment variable, ignoring values that fail to parse
pub fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    lookup_parse(key, process_env)
}

/// Non-empty, trimmed value of `key` from `lookup`
pub fn lookup_string(key: &str, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Boolean flag of `key` from `lookup`
pub fn lookup_flag(key: &str, lookup: impl Fn(&str) -> Option<String>) -> Option<bool> {
    let value = lookup_string(key, lookup)?;
    let flag = parse_flag(&value);
    if flag.is_none() {
        warn!(key, value = %value, "Ignoring unrecognised flag value");
    }
    flag
}

/// Parsed value of `key` from `lookup`
pub fn lookup_parse<T: FromStr>(key: &str, lookup: impl Fn(&str) -> Option<String>) -> Option<T> {
    let value = lookup_string(key, lookup)?;
    let parsed = value.parse().ok();
    if parsed.is_none() {
        warn!(key, value = %value, "Ignoring unparsable value");
    }
    parsed
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
