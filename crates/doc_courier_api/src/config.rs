//! Service configuration.
//!
//! Everything is read from environment variables at startup. Unset or empty
//! variables fall back to their defaults; values that are set but unusable
//! stop the service from starting.
//!
//! | Variable                 | Default                       |
//! |--------------------------|-------------------------------|
//! | `API_HOST`               | `0.0.0.0`                     |
//! | `API_PORT`               | `8080`                        |
//! | `GITHUB_API_BASE`        | `https://api.github.com`      |
//! | `DEFAULT_OWNER`          | `kannwism`                    |
//! | `DEFAULT_REPO`           | `hh-docs`                     |
//! | `DEFAULT_BASE_BRANCH`    | `main`                        |
//! | `DEFAULT_COMMIT_MESSAGE` | `Add files via edge function` |
//! | `LOG_FORMAT`             | `text` (or `json`)            |

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use doc_courier_core::RequestDefaults;
use github_client::DEFAULT_API_BASE;
use thiserror::Error;

use crate::DEFAULT_PORT;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

pub const ENV_API_HOST: &str = "API_HOST";
pub const ENV_API_PORT: &str = "API_PORT";
pub const ENV_GITHUB_API_BASE: &str = "GITHUB_API_BASE";
pub const ENV_DEFAULT_OWNER: &str = "DEFAULT_OWNER";
pub const ENV_DEFAULT_REPO: &str = "DEFAULT_REPO";
pub const ENV_DEFAULT_BASE_BRANCH: &str = "DEFAULT_BASE_BRANCH";
pub const ENV_DEFAULT_COMMIT_MESSAGE: &str = "DEFAULT_COMMIT_MESSAGE";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Configuration errors raised at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &str, value: &str, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,

    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err("expected 'text' or 'json'".to_string()),
        }
    }
}

/// Runtime configuration of the API service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address to bind to
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// GitHub REST API base URL
    pub github_api_base: String,

    /// Fallbacks for the optional request fields
    pub defaults: RequestDefaults,

    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            github_api_base: DEFAULT_API_BASE.to_string(),
            defaults: RequestDefaults::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first variable that is set
    /// but cannot be used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first variable that is set
    /// but cannot be used.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get(ENV_API_HOST) {
            config.host = host
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(ENV_API_HOST, &host, e))?;
        }

        if let Some(port) = get(ENV_API_PORT) {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(ENV_API_PORT, &port, e))?;
        }

        if let Some(api_base) = get(ENV_GITHUB_API_BASE) {
            if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
                return Err(ConfigError::invalid(
                    ENV_GITHUB_API_BASE,
                    &api_base,
                    "expected an http(s) URL",
                ));
            }
            config.github_api_base = api_base;
        }

        if let Some(owner) = get(ENV_DEFAULT_OWNER) {
            config.defaults.owner = owner;
        }
        if let Some(repo) = get(ENV_DEFAULT_REPO) {
            config.defaults.repo = repo;
        }
        if let Some(base_branch) = get(ENV_DEFAULT_BASE_BRANCH) {
            config.defaults.base_branch = base_branch;
        }
        if let Some(commit_message) = get(ENV_DEFAULT_COMMIT_MESSAGE) {
            config.defaults.commit_message = commit_message;
        }

        if let Some(format) = get(ENV_LOG_FORMAT) {
            config.log_format = format
                .parse()
                .map_err(|e: String| ConfigError::invalid(ENV_LOG_FORMAT, &format, e))?;
        }

        Ok(config)
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
