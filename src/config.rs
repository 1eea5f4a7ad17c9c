//! Runtime configuration read from the environment.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::images::ImagePolicy;

pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";
pub const DEFAULT_IMAGE_DOMAINS: &str = "cdn.dummyjson.com,google.com";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid url: {source}")]
    InvalidUrl {
        name: &'static str,
        source: url::ParseError,
    },
    #[error("{name} must be a positive number, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },
    #[error("unknown APP_ENV `{0}`")]
    InvalidEnvironment(String),
}

/// Deployment stage. Decides the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    Staging,
    #[default]
    Development,
}

impl Environment {
    /// Staging and production ship logs as JSON.
    pub fn json_logs(self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub catalog_url: Url,
    pub image_policy: ImagePolicy,
    pub port: u16,
    pub catalog_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup. Unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("APP_ENV").map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("development") => Environment::Development,
            Some("staging") => Environment::Staging,
            Some("production") => Environment::Production,
            Some(other) => return Err(ConfigError::InvalidEnvironment(other.to_string())),
        };

        let catalog_url = get("CATALOG_BASE_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.into());
        let catalog_url = Url::parse(catalog_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            name: "CATALOG_BASE_URL",
            source,
        })?;

        let domains = get("IMAGE_DOMAINS").unwrap_or_else(|| DEFAULT_IMAGE_DOMAINS.into());
        let image_policy = ImagePolicy::new(domains.split(','));

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("CATALOG_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidNumber {
                    name: "CATALOG_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            environment,
            catalog_url,
            image_policy,
            port,
            catalog_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_public_catalog() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.environment, Environment::Development);
        assert_eq!(settings.catalog_url.as_str(), "https://dummyjson.com/");
        assert_eq!(settings.image_policy.domains(), ["cdn.dummyjson.com", "google.com"]);
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.catalog_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let settings = settings(&[
            ("APP_ENV", "Production"),
            ("CATALOG_BASE_URL", "http://localhost:9000/api/"),
            ("IMAGE_DOMAINS", "img.local"),
            ("PORT", "8080"),
            ("CATALOG_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert!(settings.environment.json_logs());
        assert_eq!(settings.catalog_url.path(), "/api/");
        assert!(settings.image_policy.allows("http://img.local/a.png"));
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.catalog_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            settings(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidNumber { name: "PORT", .. })
        ));
        assert!(matches!(
            settings(&[("CATALOG_BASE_URL", "not a url")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            settings(&[("CATALOG_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidNumber { name: "CATALOG_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            settings(&[("APP_ENV", "qa")]),
            Err(ConfigError::InvalidEnvironment(_))
        ));
    }
}
