//! Environment-variable helpers for service configuration
//!
//! Every service reads its configuration from the process environment at
//! construction time. Parsing never fails: a missing or malformed value
//! falls back to the supplied default.

use std::str::FromStr;

/// Read `key`, falling back to `default` when unset or empty.
pub fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Read and parse `key`, falling back to `default` when unset or unparseable.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read `key` as a comma-separated list, trimming entries and dropping
/// empties. Returns `None` when the variable is unset or contains no
/// entries.
pub fn env_list(key: &str) -> Option<Vec<String>> {
    let raw = std::env::var(key).ok()?;
    let entries: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_when_unset() {
        assert_eq!(env_or("COMMON_TEST_UNSET_VAR", "fallback"), "fallback");
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("COMMON_TEST_PORT", "not-a-number");
        assert_eq!(env_parse("COMMON_TEST_PORT", 587u16), 587);
        std::env::remove_var("COMMON_TEST_PORT");
    }

    #[test]
    fn env_list_splits_and_trims() {
        std::env::set_var("COMMON_TEST_LIST", "a@example.com, b@example.com ,");
        assert_eq!(
            env_list("COMMON_TEST_LIST").unwrap(),
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );
        std::env::remove_var("COMMON_TEST_LIST");
    }

    #[test]
    fn env_list_empty_is_none() {
        std::env::set_var("COMMON_TEST_EMPTY_LIST", " , ,");
        assert_eq!(env_list("COMMON_TEST_EMPTY_LIST"), None);
        std::env::remove_var("COMMON_TEST_EMPTY_LIST");
    }
}
