// ABOUTME: Startup configuration - the provider API key and endpoint.
// ABOUTME: Validation returns a Result; only the binary decides whether to exit.

use crate::error::ConfigError;

/// Environment variable holding the directions provider API key.
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Environment variable overriding the directions endpoint.
pub const DIRECTIONS_URL_VAR: &str = "DIRECTIONS_API_URL";

/// Default Google Directions JSON endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub directions_url: String,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar(API_KEY_VAR))?;

        let directions_url = match lookup(DIRECTIONS_URL_VAR) {
            Some(url) if !url.trim().is_empty() => {
                let url = url.trim().to_string();
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        name: DIRECTIONS_URL_VAR,
                        value: url,
                    });
                }
                url
            }
            _ => DEFAULT_DIRECTIONS_URL.to_string(),
        };

        Ok(Self {
            api_key,
            directions_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key() {
        let result = Config::from_lookup(lookup(&[]));
        match result {
            Err(ConfigError::MissingVar(name)) => assert_eq!(name, API_KEY_VAR),
            other => panic!("Expected MissingVar, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let result = Config::from_lookup(lookup(&[(API_KEY_VAR, "   ")]));
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn test_defaults_directions_url() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "key-123")])).unwrap();
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.directions_url, DEFAULT_DIRECTIONS_URL);
    }

    #[test]
    fn test_directions_url_override() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "key-123"),
            (DIRECTIONS_URL_VAR, "http://localhost:9000/directions"),
        ]))
        .unwrap();
        assert_eq!(config.directions_url, "http://localhost:9000/directions");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "key-123"),
            (DIRECTIONS_URL_VAR, "ftp://example.com"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
