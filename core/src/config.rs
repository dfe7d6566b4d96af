//! Client configuration sourced from the environment.
//!
//! Resolution order for the base URL is `API_BASE_URL`, then
//! `MANAGER_API_URL`, then `http://{MANAGER_HOST}:{MANAGER_PORT}` with
//! `localhost:8080` defaults. Loading `.env` files is left to binaries.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while reading configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid timeout `{0}`: expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("unknown API layout `{0}`: expected `plain` or `spring`")]
    UnknownLayout(String),
}

/// Path convention of the consumed API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiLayout {
    /// `health`, `tasks`, `version` directly under the base URL.
    #[default]
    Plain,
    /// `actuator/health`, `api/tasks`, `api/version`.
    Spring,
}

impl ApiLayout {
    pub fn health_path(self) -> &'static str {
        match self {
            ApiLayout::Plain => "health",
            ApiLayout::Spring => "actuator/health",
        }
    }

    pub fn tasks_path(self) -> &'static str {
        match self {
            ApiLayout::Plain => "tasks",
            ApiLayout::Spring => "api/tasks",
        }
    }

    pub fn version_path(self) -> &'static str {
        match self {
            ApiLayout::Plain => "version",
            ApiLayout::Spring => "api/version",
        }
    }
}

impl FromStr for ApiLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(ApiLayout::Plain),
            "spring" => Ok(ApiLayout::Spring),
            _ => Err(ConfigError::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for ApiLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiLayout::Plain => f.write_str("plain"),
            ApiLayout::Spring => f.write_str("spring"),
        }
    }
}

/// Immutable settings for a `TaskClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub layout: ApiLayout,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}"),
            timeout: DEFAULT_TIMEOUT,
            layout: ApiLayout::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = match get("API_BASE_URL").or_else(|| get("MANAGER_API_URL")) {
            Some(url) => url,
            None => {
                let host = get("MANAGER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
                let port = get("MANAGER_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
                format!("http://{host}:{port}")
            }
        };
        let timeout = match get("TASKS_API_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };
        let layout = match get("TASKS_API_LAYOUT") {
            Some(raw) => raw.parse()?,
            None => ApiLayout::default(),
        };

        Ok(Self {
            base_url,
            timeout,
            layout,
        })
    }
}

/// Parse a positive whole number of seconds.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
