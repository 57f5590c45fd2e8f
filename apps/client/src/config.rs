//! Client configuration from the environment.

use std::time::Duration;

use thiserror::Error;

use crate::fetcher::{DEFAULT_AMOUNT, MAX_AMOUNT};

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 300;
const DEFAULT_REVEAL_DELAY_MS: u64 = 1500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{key} must be between 1 and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        max: u64,
    },
}

/// Runtime settings for the trivia client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub amount: u32,
    pub timeout: Duration,
    pub reveal_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            amount: DEFAULT_AMOUNT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// `.env` is not read here; `run` loads it once at startup.
    ///
    /// Optional env vars:
    /// - TRIVIA_API_URL: Trivia API endpoint
    /// - TRIVIA_AMOUNT: Questions per game (1-50)
    /// - TRIVIA_TIMEOUT_SECS: HTTP request timeout (1-300)
    /// - TRIVIA_REVEAL_DELAY_MS: Pause after an answer before the next question
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("TRIVIA_API_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let amount = match lookup("TRIVIA_AMOUNT") {
            Some(raw) => parse_bounded("TRIVIA_AMOUNT", &raw, u64::from(MAX_AMOUNT))? as u32,
            None => defaults.amount,
        };

        let timeout = match lookup("TRIVIA_TIMEOUT_SECS") {
            Some(raw) => {
                Duration::from_secs(parse_bounded("TRIVIA_TIMEOUT_SECS", &raw, MAX_TIMEOUT_SECS)?)
            }
            None => defaults.timeout,
        };

        let reveal_delay = match lookup("TRIVIA_REVEAL_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_u64("TRIVIA_REVEAL_DELAY_MS", &raw)?),
            None => defaults.reveal_delay,
        };

        Ok(Self {
            api_url,
            amount,
            timeout,
            reveal_delay,
        })
    }
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Parse a value that must lie in `1..=max`.
fn parse_bounded(key: &'static str, raw: &str, max: u64) -> Result<u64, ConfigError> {
    let value = parse_u64(key, raw)?;
    if value == 0 || value > max {
        return Err(ConfigError::OutOfRange { key, value, max });
    }
    Ok(value)
}
