//! Configuration management via environment variables
//!
//! Helpers for reading an environment variable with a fallback name.

/// Get an environment variable, falling back to a secondary name
///
/// If `primary` is set, returns its value. Otherwise the value of
/// `fallback` is returned when present.
///
/// # Example
/// ```
/// use mockingjay_server::config::get_env_with_fallback;
///
/// let level = get_env_with_fallback("MOCKINGJAY_LOG_LEVEL", "RUST_LOG");
/// ```
pub fn get_env_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    if let Ok(val) = std::env::var(primary) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(fallback) {
        tracing::debug!(
            "Environment variable '{}' not set, using '{}'",
            primary,
            fallback
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(primary: &str, fallback: &str, default: &str) -> String {
    get_env_with_fallback(primary, fallback).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_get_env_with_fallback_primary_name() {
        std::env::set_var("MJ_TEST_PRIMARY", "primary");
        std::env::set_var("MJ_TEST_FALLBACK", "fallback");

        let result = get_env_with_fallback("MJ_TEST_PRIMARY", "MJ_TEST_FALLBACK");
        assert_eq!(result, Some("primary".to_string()));

        std::env::remove_var("MJ_TEST_PRIMARY");
        std::env::remove_var("MJ_TEST_FALLBACK");
    }

    #[test]
    #[serial]
    fn test_get_env_with_fallback_secondary_name() {
        std::env::remove_var("MJ_TEST_PRIMARY");
        std::env::set_var("MJ_TEST_FALLBACK", "fallback");

        let result = get_env_with_fallback("MJ_TEST_PRIMARY", "MJ_TEST_FALLBACK");
        assert_eq!(result, Some("fallback".to_string()));

        std::env::remove_var("MJ_TEST_FALLBACK");
    }

    #[test]
    #[serial]
    fn test_get_env_with_fallback_or_default() {
        std::env::remove_var("MJ_TEST_PRIMARY");
        std::env::remove_var("MJ_TEST_FALLBACK");

        let result = get_env_with_fallback_or("MJ_TEST_PRIMARY", "MJ_TEST_FALLBACK", "info");
        assert_eq!(result, "info");
    }
}
