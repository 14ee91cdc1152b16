//! Service configuration parsed from environment variables.
//!
//! `.env` is loaded by `main` before this runs. LLM settings live in
//! [`crate::llm::config`] because a missing key is not fatal.

use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TEST_RUN_DURATION_MS: u64 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub test_run_duration: Duration,
}

impl AppConfig {
    /// Build typed service config from environment variables.
    ///
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `TEST_RUN_DURATION_MS`: default 3000
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a set variable does not parse.
    /// Unlike the LLM timeouts, a malformed port is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let run_ms = env_parse("TEST_RUN_DURATION_MS", DEFAULT_TEST_RUN_DURATION_MS)?;

        Ok(Self { bind_addr, port, test_run_duration: Duration::from_millis(run_ms) })
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn env_parse<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
