//! Relay configuration
//!
//! All configuration comes from environment variables (a `.env` file is
//! loaded first by `main`). Required:
//!
//! - `GROQ_API_KEY` — completion service API key
//! - `SPREADSHEET_ID` — target spreadsheet for exchange logging
//!
//! Optional:
//!
//! - `SERVICE_ACCOUNT_FILE` — credentials bundle path (default `credentials.json`)
//! - `PORT` — listening port (default 5000)
//! - `GROQ_MODEL` — completion model id (default `llama3-70b-8192`)
//! - `UPSTREAM_TIMEOUT_SECS` — per-request upstream timeout (default 60)
//! - `SESSION_CAPACITY` — max live sessions, LRU-evicted (default unbounded)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::{RelayError, RelayResult};

const DEFAULT_MODEL: &str = "llama3-70b-8192";
const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "credentials.json";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration for the relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub groq_api_key: String,
    pub model: String,
    pub spreadsheet_id: String,
    pub service_account_file: PathBuf,
    pub port: u16,
    pub upstream_timeout: Duration,
    pub session_capacity: Option<usize>,
}

impl RelayConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> RelayResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RelayResult<Self> {
        let groq_api_key = require(&lookup, "GROQ_API_KEY")?;
        let spreadsheet_id = require(&lookup, "SPREADSHEET_ID")?;

        let model = lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let service_account_file = lookup("SERVICE_ACCOUNT_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVICE_ACCOUNT_FILE));

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;
        let session_capacity = match lookup("SESSION_CAPACITY") {
            Some(raw) => Some(parse(&raw, "SESSION_CAPACITY")?),
            None => None,
        };

        Ok(Self {
            groq_api_key,
            model,
            spreadsheet_id,
            service_account_file,
            port,
            upstream_timeout: Duration::from_secs(timeout_secs),
            session_capacity,
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> RelayResult<String> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| RelayError::InvalidConfig(format!("{} environment variable not set", key)))
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> RelayResult<T> {
    match lookup(key) {
        Some(raw) => parse(&raw, key),
        None => Ok(default),
    }
}

fn parse<T: std::str::FromStr>(raw: &str, key: &str) -> RelayResult<T> {
    raw.parse()
        .map_err(|_| RelayError::InvalidConfig(format!("{} is not a valid value for {}", raw, key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn config_from(vars: HashMap<String, String>) -> RelayResult<RelayConfig> {
        RelayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = config_from(env(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("SPREADSHEET_ID", "sheet123"),
        ]))
        .unwrap();

        assert_eq!(config.model, "llama3-70b-8192");
        assert_eq!(config.port, 5000);
        assert_eq!(config.service_account_file, PathBuf::from("credentials.json"));
        assert_eq!(config.upstream_timeout, Duration::from_secs(60));
        assert!(config.session_capacity.is_none());
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = config_from(env(&[("SPREADSHEET_ID", "sheet123")])).unwrap_err();
        assert!(matches!(err, RelayError::InvalidConfig(_)));
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(env(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("SPREADSHEET_ID", "sheet123"),
            ("PORT", "8080"),
            ("SESSION_CAPACITY", "500"),
            ("UPSTREAM_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.session_capacity, Some(500));
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_garbage_port_is_an_error() {
        let err = config_from(env(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("SPREADSHEET_ID", "sheet123"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RelayError::InvalidConfig(_)));
    }
}
