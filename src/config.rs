use std::{env, time::Duration};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://www.goldapi.io/api";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No access token configured, set GOLDAPI_ACCESS_TOKEN.")]
    MissingToken,
    #[error("{var} must be a whole number of seconds, got {value:?}.")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{0} must not be zero.")]
    ZeroInterval(&'static str),
    #[error("Could not build HTTP client: {0}")]
    Client(String),
}

/// Upstream and refresh settings. The access token is injected at runtime
/// and never has a default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub access_token: Option<String>,
    /// Applied to each upstream request.
    pub timeout: Duration,
    pub refresh_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            access_token: None,
            timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Read the configuration from `GOLDAPI_ENDPOINT`, `GOLDAPI_ACCESS_TOKEN`,
    /// `GOLDAPI_TIMEOUT_SECS` and `BULLION_REFRESH_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|var| env::var(var).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(endpoint) = lookup("GOLDAPI_ENDPOINT") {
            config.endpoint = endpoint;
        }
        config.access_token = lookup("GOLDAPI_ACCESS_TOKEN");
        if let Some(value) = lookup("GOLDAPI_TIMEOUT_SECS") {
            config.timeout = seconds("GOLDAPI_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("BULLION_REFRESH_SECS") {
            config.refresh_interval = seconds("BULLION_REFRESH_SECS", value)?;
        }

        log::debug!(
            "Using endpoint {}, access token {}",
            config.endpoint,
            if config.access_token.is_some() { "set" } else { "unset" }
        );

        Ok(config)
    }
}

fn seconds(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::ZeroInterval(var)),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(ConfigError::InvalidNumber { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn overrides() {
        let config = from(&[
            ("GOLDAPI_ENDPOINT", "http://localhost:8080/api"),
            ("GOLDAPI_ACCESS_TOKEN", "secret"),
            ("GOLDAPI_TIMEOUT_SECS", "3"),
            ("BULLION_REFRESH_SECS", " 60 "),
        ])
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/api");
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn empty_token_is_unset() {
        let config = from(&[("GOLDAPI_ACCESS_TOKEN", "  ")]).unwrap();
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn invalid_numbers() {
        assert_eq!(
            from(&[("GOLDAPI_TIMEOUT_SECS", "soon")]).unwrap_err(),
            ConfigError::InvalidNumber {
                var: "GOLDAPI_TIMEOUT_SECS",
                value: "soon".to_owned()
            }
        );
        assert_eq!(
            from(&[("BULLION_REFRESH_SECS", "0")]).unwrap_err(),
            ConfigError::ZeroInterval("BULLION_REFRESH_SECS")
        );
    }
}
