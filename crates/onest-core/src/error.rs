//! Centralized error types for the OneST portal.
//!
//! `AppError` is what request handlers return. Each variant carries a stable
//! machine-readable code (`code()`) and a message safe to show to end users
//! (`user_message()`); the `Display` text keeps the full detail for logs.

use onest_weather::WeatherError;
use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Stable error code reported to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingParameter(_) => "MISSING_PARAMETER",
            AppError::InvalidLocation(_) => "INVALID_LOCATION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Weather(WeatherError::AllSourcesFailed { .. }) => "UPSTREAM_UNAVAILABLE",
            AppError::Weather(_) => "WEATHER_SERVICE_ERROR",
            AppError::Config(_) | AppError::Io(_) | AppError::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller sent a bad request (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::MissingParameter(_) | AppError::InvalidLocation(_) | AppError::NotFound(_)
        )
    }

    /// Returns a user-friendly message suitable for display in the portal.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::MissingParameter(_) => "A required parameter is missing.",
            AppError::InvalidLocation(_) => {
                "Unknown location. Use /weather/locations to see supported areas."
            }
            AppError::NotFound(_) => "The requested resource does not exist.",
            AppError::Weather(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) | AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not available")]
    NoConfigDir,

    #[error("Failed to read configuration: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write configuration: {0}")]
    Write(#[source] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "Configuration directory not found. Using defaults.",
            ConfigError::Read(_) | ConfigError::Write(_) => "Configuration file is not accessible.",
            ConfigError::Parse(_) | ConfigError::Serialize(_) => {
                "Configuration file is malformed. Check your settings."
            }
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
