// ABOUTME: Environment variable names and lookup helpers
// ABOUTME: Shared by the binary and any package that reads process configuration

use std::env;
use std::str::FromStr;

use tracing::warn;

pub mod constants;

/// Read an environment variable, treating blank values as unset
pub fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read an environment variable or fall back to `default`
pub fn env_var_or(name: &str, default: &str) -> String {
    env_var(name).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when it is
/// unset or unparsable
pub fn parse_env_or<T: FromStr>(name: &str, default: T) -> T {
    match env_var(name) {
        Some(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring invalid value for {}: {:?}", name, raw);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_blank_values_are_unset() {
        env::set_var("MINDGATE_TEST_BLANK", "   ");
        assert_eq!(env_var("MINDGATE_TEST_BLANK"), None);
        assert_eq!(env_var_or("MINDGATE_TEST_BLANK", "fallback"), "fallback");
        env::remove_var("MINDGATE_TEST_BLANK");
    }

    #[test]
    #[serial]
    fn test_parse_env_or() {
        env::set_var("MINDGATE_TEST_NUMBER", "42");
        assert_eq!(parse_env_or("MINDGATE_TEST_NUMBER", 7u64), 42);

        env::set_var("MINDGATE_TEST_NUMBER", "forty-two");
        assert_eq!(parse_env_or("MINDGATE_TEST_NUMBER", 7u64), 7);

        env::remove_var("MINDGATE_TEST_NUMBER");
        assert_eq!(parse_env_or("MINDGATE_TEST_NUMBER", 7u64), 7);
    }
}
