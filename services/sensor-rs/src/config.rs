use std::time::Duration;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix of the environment variables that override [`Config`] fields.
pub const ENV_PREFIX: &str = "CITYSENSE_";

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:5000/api/update-live-data";
pub const DEFAULT_IMAGE_URL: &str = "https://via.placeholder.com/150?text=Live+Detection";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Where every detection event is POSTed.
    pub endpoint_url: String,
    /// Pause after each iteration.
    pub interval_ms: u64,
    /// Upper bound for one POST, connect included.
    pub request_timeout_ms: u64,
    pub base_lat: f64,
    pub base_lng: f64,
    /// Coordinates are jittered uniformly by up to this many degrees in each axis.
    pub max_offset: f64,
    pub image_url: String,
    /// Stop after this many iterations. Unset runs until interrupted.
    pub max_iterations: Option<u64>,
    /// Fixed RNG seed for reproducible event streams.
    pub seed: Option<u64>,
    /// Fallback filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            interval_ms: 5000,
            request_timeout_ms: 5000,
            base_lat: 19.1136,
            base_lng: 72.8697,
            max_offset: 0.01,
            image_url: DEFAULT_IMAGE_URL.to_string(),
            max_iterations: None,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults merged with `CITYSENSE_*` environment variables, then validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint()?;

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.max_offset.is_finite() || self.max_offset < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_offset",
                reason: format!("expected a finite, non-negative number, got {}", self.max_offset),
            });
        }
        for (field, value) in [("base_lat", self.base_lat), ("base_lng", self.base_lng)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("expected a finite number, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Parsed endpoint; only http and https are accepted.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint_url).map_err(|e| ConfigError::InvalidEndpoint {
            url: self.endpoint_url.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidEndpoint {
                url: self.endpoint_url.clone(),
                reason: format!("unsupported scheme {other:?}"),
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_match_live_feed() {
        let config = Config::default();
        assert_eq!(config.endpoint_url, "http://localhost:5000/api/update-live-data");
        assert_eq!(config.interval(), Duration::from_secs(5));
        assert_eq!(config.base_lat, 19.1136);
        assert_eq!(config.base_lng, 72.8697);
        assert_eq!(config.max_offset, 0.01);
        assert!(config.max_iterations.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("CITYSENSE_ENDPOINT_URL", "http://127.0.0.1:9000/ingest");
            jail.set_env("CITYSENSE_INTERVAL_MS", "250");
            jail.set_env("CITYSENSE_MAX_ITERATIONS", "3");
            jail.set_env("CITYSENSE_SEED", "42");

            let config = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(config.endpoint_url, "http://127.0.0.1:9000/ingest");
            assert_eq!(config.interval_ms, 250);
            assert_eq!(config.max_iterations, Some(3));
            assert_eq!(config.seed, Some(42));
            // untouched fields keep their defaults
            assert_eq!(config.request_timeout_ms, 5000);
            assert_eq!(config.image_url, DEFAULT_IMAGE_URL);
            Ok(())
        });
    }

    #[test]
    fn load_rejects_bad_endpoint() {
        Jail::expect_with(|jail| {
            jail.set_env("CITYSENSE_ENDPOINT_URL", "not a url");
            match Config::load() {
                Err(ConfigError::InvalidEndpoint { url, .. }) => assert_eq!(url, "not a url"),
                other => panic!("expected InvalidEndpoint, got {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = Config {
            endpoint_url: "ftp://localhost/api".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout_and_negative_offset() {
        let config = Config {
            request_timeout_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "request_timeout_ms", .. })
        ));

        let config = Config {
            max_offset: -0.5,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "max_offset", .. })
        ));

        let config = Config {
            base_lat: f64::NAN,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "base_lat", .. })
        ));
    }
}
