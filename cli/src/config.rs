use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub const BASE_URL_VAR: &str = "CATALOG_BASE_URL";
pub const TIMEOUT_VAR: &str = "CATALOG_TIMEOUT_SECS";
pub const FAVORITES_STORE_VAR: &str = "FAVORITES_STORE_PATH";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Catalog base URL missing, set CATALOG_BASE_URL or pass --base-url")]
    MissingBaseUrl,
    #[error("Invalid CATALOG_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
    #[error("Could not resolve data directory: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub favorites_store_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub favorites_store_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let base_url = overrides
            .base_url
            .or_else(|| lookup(BASE_URL_VAR))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match lookup(TIMEOUT_VAR) {
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(value))?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };

        let favorites_store_path = match overrides
            .favorites_store_path
            .or_else(|| lookup(FAVORITES_STORE_VAR).map(PathBuf::from))
        {
            Some(path) => path,
            None => file_system::get_favorites_store_path()?,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            favorites_store_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_from_environment() {
        let lookup = lookup_from(&[
            (BASE_URL_VAR, "http://localhost:3000 "),
            (TIMEOUT_VAR, "30"),
            (FAVORITES_STORE_VAR, "/tmp/favorites.json"),
        ]);

        let config = AppConfig::from_lookup(lookup, ConfigOverrides::default()).unwrap();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.favorites_store_path, PathBuf::from("/tmp/favorites.json"));
    }

    #[test]
    fn test_overrides_win_over_environment() {
        let lookup = lookup_from(&[
            (BASE_URL_VAR, "http://env"),
            (TIMEOUT_VAR, "30"),
            (FAVORITES_STORE_VAR, "/tmp/env.json"),
        ]);
        let overrides = ConfigOverrides {
            base_url: Some("http://flag".to_string()),
            timeout_secs: Some(2),
            favorites_store_path: Some(PathBuf::from("/tmp/flag.json")),
        };

        let config = AppConfig::from_lookup(lookup, overrides).unwrap();

        assert_eq!(config.base_url, "http://flag");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.favorites_store_path, PathBuf::from("/tmp/flag.json"));
    }

    #[test]
    fn test_default_timeout() {
        let lookup = lookup_from(&[
            (BASE_URL_VAR, "http://env"),
            (FAVORITES_STORE_VAR, "/tmp/env.json"),
        ]);

        let config = AppConfig::from_lookup(lookup, ConfigOverrides::default()).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_missing_base_url() {
        let lookup = lookup_from(&[(BASE_URL_VAR, "  ")]);
        let result = AppConfig::from_lookup(lookup, ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
    }

    #[test]
    fn test_invalid_timeout() {
        let lookup = lookup_from(&[(BASE_URL_VAR, "http://env"), (TIMEOUT_VAR, "soon")]);
        let result = AppConfig::from_lookup(lookup, ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(value)) if value == "soon"));
    }
}
