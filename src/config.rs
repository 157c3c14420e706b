// src/config.rs

use std::{env, time::Duration};

use dotenvy::dotenv;

use crate::error::ConfigError;

pub const DEFAULT_QUESTIONS_PATH: &str = "api";
pub const DEFAULT_SUBMIT_PATH: &str = "check";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub questions_path: String,
    pub submit_path: String,
    /// Static anti-forgery token; takes precedence over `cookie`.
    pub csrf_token: Option<String>,
    /// Raw cookie header to read the `csrftoken` cookie from.
    pub cookie: Option<String>,
    pub request_timeout: Duration,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = non_empty("QUIZ_API_BASE_URL").ok_or(ConfigError::Missing("QUIZ_API_BASE_URL"))?;

        let questions_path =
            non_empty("QUIZ_QUESTIONS_PATH").unwrap_or_else(|| DEFAULT_QUESTIONS_PATH.to_string());
        let submit_path = non_empty("QUIZ_SUBMIT_PATH").unwrap_or_else(|| DEFAULT_SUBMIT_PATH.to_string());

        let request_timeout = match non_empty("QUIZ_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "QUIZ_REQUEST_TIMEOUT_SECS",
                    reason: e.to_string(),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            questions_path,
            submit_path,
            csrf_token: non_empty("QUIZ_CSRF_TOKEN"),
            cookie: non_empty("QUIZ_COOKIE"),
            request_timeout,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_dir: non_empty("QUIZ_LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[("QUIZ_API_BASE_URL", "http://localhost:8000/quiz/1")])).unwrap();
        assert_eq!(config.questions_path, DEFAULT_QUESTIONS_PATH);
        assert_eq!(config.submit_path, DEFAULT_SUBMIT_PATH);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.rust_log, "info");
        assert!(config.csrf_token.is_none());
    }

    #[test]
    fn base_url_is_required() {
        let err = Config::from_lookup(lookup(&[("QUIZ_API_BASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("QUIZ_API_BASE_URL")));
    }

    #[test]
    fn bad_timeout_is_reported() {
        let err = Config::from_lookup(lookup(&[
            ("QUIZ_API_BASE_URL", "http://localhost"),
            ("QUIZ_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "QUIZ_REQUEST_TIMEOUT_SECS", .. }));
    }
}
