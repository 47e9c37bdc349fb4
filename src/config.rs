//! Feed configuration
//!
//! Defaults come from [`constants`](crate::constants); any of them can be
//! overridden through the environment with [`FeedConfig::from_env`].

use crate::{
    constants::{
        DEFAULT_EXPIRY_SECS, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
        ENV_EXPIRY_SECS, ENV_REFRESH_INTERVAL_SECS, ENV_REQUEST_TIMEOUT_SECS,
    },
    error::ConfigError,
};
use std::time::Duration;

/// Timing parameters of a single feed, fixed for the lifetime of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Pause between two fetch cycles
    pub refresh_interval: Duration,
    /// Age past which stored prices are reported as absent
    pub expiry: Duration,
    /// Upper bound on a single HTTP request
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            expiry: Duration::from_secs(DEFAULT_EXPIRY_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl FeedConfig {
    /// Creates a validated configuration from whole seconds
    pub fn new(refresh_interval_secs: u64, expiry_secs: u64) -> Result<Self, ConfigError> {
        let config = Self {
            refresh_interval: Duration::from_secs(refresh_interval_secs),
            expiry: Duration::from_secs(expiry_secs),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds a configuration from the defaults overlaid with environment variables
    ///
    /// Recognized variables:
    /// * `GASPRICE_REFRESH_INTERVAL_SECS`
    /// * `GASPRICE_EXPIRY_SECS`
    /// * `GASPRICE_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secs = |var: &str, default: u64| -> Result<u64, ConfigError> {
            match lookup(var) {
                Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: var.to_string(),
                    value,
                }),
                None => Ok(default),
            }
        };

        let config = Self {
            refresh_interval: Duration::from_secs(secs(
                ENV_REFRESH_INTERVAL_SECS,
                DEFAULT_REFRESH_INTERVAL_SECS,
            )?),
            expiry: Duration::from_secs(secs(ENV_EXPIRY_SECS, DEFAULT_EXPIRY_SECS)?),
            request_timeout: Duration::from_secs(secs(
                ENV_REQUEST_TIMEOUT_SECS,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero durations
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        if self.expiry.is_zero() {
            return Err(ConfigError::ZeroExpiry);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_new_rejects_zero_values() {
        assert_eq!(FeedConfig::new(0, 600), Err(ConfigError::ZeroRefreshInterval));
        assert_eq!(FeedConfig::new(10, 0), Err(ConfigError::ZeroExpiry));
        assert!(FeedConfig::new(10, 600).is_ok());
    }

    #[test]
    fn test_from_env_uses_defaults_when_unset() {
        let config = FeedConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn test_from_env_overrides() {
        let config = FeedConfig::from_lookup(lookup_from(&[
            (ENV_REFRESH_INTERVAL_SECS, "30"),
            (ENV_EXPIRY_SECS, " 120 "),
        ]))
        .unwrap();

        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.expiry, Duration::from_secs(120));
        assert_eq!(
            config.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_from_env_rejects_garbage() {
        let err = FeedConfig::from_lookup(lookup_from(&[(ENV_EXPIRY_SECS, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: ENV_EXPIRY_SECS.to_string(),
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_from_env_rejects_zero_timeout() {
        let err =
            FeedConfig::from_lookup(lookup_from(&[(ENV_REQUEST_TIMEOUT_SECS, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroRequestTimeout);
    }
}
