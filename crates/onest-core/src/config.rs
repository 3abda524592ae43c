use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a summary of all errors, `;`-separated
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather upstreams and cache settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Endpoint tried first (data.gov.sg v2)
    #[serde(default = "default_secondary_url")]
    pub secondary_url: String,

    /// Fallback endpoint (data.gov.sg v1)
    #[serde(default = "default_primary_url")]
    pub primary_url: String,

    /// How long a fetched forecast stays fresh
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,

    /// Per-request timeout for each upstream call
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_secondary_url() -> String {
    onest_weather::provider::SECONDARY_URL.to_string()
}

fn default_primary_url() -> String {
    onest_weather::provider::PRIMARY_URL.to_string()
}

fn default_cache_ttl_seconds() -> u64 {
    onest_weather::DEFAULT_TTL.as_secs()
}

fn default_request_timeout_seconds() -> u64 {
    onest_weather::provider::REQUEST_TIMEOUT_SECS
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            secondary_url: default_secondary_url(),
            primary_url: default_primary_url(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl WeatherConfig {
    pub fn client_config(&self) -> onest_weather::WeatherClientConfig {
        onest_weather::WeatherClientConfig {
            secondary_url: self.secondary_url.clone(),
            primary_url: self.primary_url.clone(),
            cache_ttl: Duration::from_secs(self.cache_ttl_seconds),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing,
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<Self, ConfigError> {
        Self::load()?.into_validated()
    }

    /// Reject this configuration if it has errors, logging any warnings.
    pub fn into_validated(self) -> Result<Self, ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(self)
    }

    /// `ONEST_HOST` and `ONEST_PORT` take precedence over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ONEST_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ONEST_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Ignoring invalid ONEST_PORT {:?}: {}", port, e),
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.server.port == 0 {
            result.add_error("server.port", "Port cannot be 0");
        }
        if self.server.host.trim().is_empty() {
            result.add_error("server.host", "Host cannot be empty");
        }

        validate_url(&self.weather.secondary_url, "weather.secondary_url", &mut result);
        validate_url(&self.weather.primary_url, "weather.primary_url", &mut result);

        if self.weather.cache_ttl_seconds == 0 {
            result.add_warning(
                "weather.cache_ttl_seconds",
                "Forecast caching disabled (0 seconds)",
            );
        } else if self.weather.cache_ttl_seconds > 3600 {
            result.add_warning(
                "weather.cache_ttl_seconds",
                "Cache TTL is longer than an hour; forecasts cover two hours",
            );
        }

        if self.weather.request_timeout_seconds == 0 {
            result.add_error(
                "weather.request_timeout_seconds",
                "Request timeout must be greater than 0",
            );
        }

        result
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(ConfigError::Write)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("onest").join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.weather.cache_ttl_seconds, 300);
        assert_eq!(config.weather.request_timeout_seconds, 10);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.primary_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.primary_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.secondary_url = "ftp://example.com/forecast".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_port_is_error() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_zero_ttl_is_warning() {
        let mut config = Config::default();
        config.weather.cache_ttl_seconds = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.cache_ttl_seconds"));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.weather.request_timeout_seconds = 0;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_into_validated() {
        let mut config = Config::default();
        config.weather.cache_ttl_seconds = 0;
        let config = config.into_validated().unwrap();
        assert_eq!(config.weather.cache_ttl_seconds, 0);

        let mut config = Config::default();
        config.server.port = 0;
        match config.into_validated() {
            Err(ConfigError::Invalid(summary)) => assert!(summary.contains("server.port")),
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_client_config_conversion() {
        let mut config = WeatherConfig::default();
        config.cache_ttl_seconds = 42;
        let client = config.client_config();
        assert_eq!(client.cache_ttl, Duration::from_secs(42));
        assert_eq!(client.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_load_from_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.weather.cache_ttl_seconds, 300);
    }

    #[test]
    fn test_load_from_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.weather.cache_ttl_seconds = 120;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.weather.cache_ttl_seconds, 120);
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
