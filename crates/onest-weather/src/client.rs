//! Cached two-hour forecast client with source fallback.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::instrument;

use crate::cache::{WeatherCache, DEFAULT_TTL};
use crate::filter::filter_by_location;
use crate::location::{matches_known_location, KNOWN_LOCATIONS};
use crate::observer::{CacheSlot, ForecastObserver, TracingObserver};
use crate::provider::{http_client, ForecastSource, PRIMARY_URL, REQUEST_TIMEOUT_SECS, SECONDARY_URL};
use crate::types::{CacheStatus, ForecastPayload, WeatherError};

/// Endpoints and timing for a [`WeatherClient`].
#[derive(Debug, Clone)]
pub struct WeatherClientConfig {
    pub secondary_url: String,
    pub primary_url: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for WeatherClientConfig {
    fn default() -> Self {
        Self {
            secondary_url: SECONDARY_URL.to_string(),
            primary_url: PRIMARY_URL.to_string(),
            cache_ttl: DEFAULT_TTL,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Forecast client owning its cache.
///
/// Cheap to share behind an `Arc`. The cache lock is never held across an
/// upstream request, so two concurrent misses may both fetch; the later
/// store wins.
pub struct WeatherClient {
    secondary: ForecastSource,
    primary: ForecastSource,
    cache: Mutex<WeatherCache>,
    observer: Arc<dyn ForecastObserver>,
}

impl WeatherClient {
    pub fn new(config: WeatherClientConfig) -> Result<Self, WeatherError> {
        let client = Arc::new(http_client(config.request_timeout)?);

        Ok(Self {
            secondary: ForecastSource::new("secondary", config.secondary_url, client.clone()),
            primary: ForecastSource::new("primary", config.primary_url, client),
            cache: Mutex::new(WeatherCache::new(config.cache_ttl)),
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the default tracing observer.
    pub fn with_observer(mut self, observer: Arc<dyn ForecastObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Forecast for all of Singapore (`None` or blank) or for one location.
    ///
    /// Location results are cached under the exact string given, with their
    /// own TTL clock.
    ///
    /// # Errors
    /// Returns [`WeatherError::AllSourcesFailed`] when a fetch is needed and
    /// both upstream sources fail. The cache is left untouched in that case.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_forecast(&self, location: Option<&str>) -> Result<ForecastPayload, WeatherError> {
        let Some(location) = location.filter(|l| !l.trim().is_empty()) else {
            return self.complete_forecast().await;
        };

        let slot = CacheSlot::Location(location);
        let cached = self.cache.lock().location_if_fresh(location, Utc::now());
        if let Some(payload) = cached {
            self.observer.cache_hit(slot);
            return Ok(payload);
        }
        self.observer.cache_miss(slot);

        let complete = self.complete_forecast().await?;
        let filtered = filter_by_location(&complete, Some(location));
        self.cache
            .lock()
            .store_location(location, filtered.clone(), Utc::now());

        Ok(filtered)
    }

    async fn complete_forecast(&self) -> Result<ForecastPayload, WeatherError> {
        let cached = self.cache.lock().complete_if_fresh(Utc::now());
        if let Some(payload) = cached {
            self.observer.cache_hit(CacheSlot::Complete);
            return Ok(payload);
        }
        self.observer.cache_miss(CacheSlot::Complete);

        let payload = self.fetch_fresh().await?;
        self.cache.lock().store_complete(payload.clone(), Utc::now());
        Ok(payload)
    }

    /// Secondary first, primary on any failure.
    async fn fetch_fresh(&self) -> Result<ForecastPayload, WeatherError> {
        let secondary = match self.try_source(&self.secondary).await {
            Ok(payload) => return Ok(payload),
            Err(e) => e,
        };

        let primary = match self.try_source(&self.primary).await {
            Ok(payload) => return Ok(payload),
            Err(e) => e,
        };

        Err(WeatherError::AllSourcesFailed {
            secondary: Box::new(secondary),
            primary: Box::new(primary),
        })
    }

    async fn try_source(&self, source: &ForecastSource) -> Result<ForecastPayload, WeatherError> {
        self.observer.source_attempt(source.name());
        match source.fetch().await {
            Ok(payload) => {
                self.observer.source_success(source.name());
                Ok(payload)
            }
            Err(e) => {
                self.observer.source_failure(source.name(), &e);
                Err(e)
            }
        }
    }

    /// Known location names: from the last fetch, else the static list.
    pub fn available_locations(&self) -> Vec<String> {
        let cache = self.cache.lock();
        match cache.known_locations() {
            Some(locations) => locations.to_vec(),
            None => {
                let mut names: Vec<String> = KNOWN_LOCATIONS.iter().map(|n| n.to_string()).collect();
                names.sort();
                names
            }
        }
    }

    /// Lenient check that `location` names a known area.
    pub fn is_valid_location(&self, location: Option<&str>) -> bool {
        let cache = self.cache.lock();
        match cache.known_locations() {
            Some(known) => matches_known_location(location, known),
            None => matches_known_location(location, &KNOWN_LOCATIONS),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
        tracing::info!("Weather cache cleared");
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache.lock().status(Utc::now())
    }
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("secondary", &self.secondary.url())
            .field("primary", &self.primary.url())
            .field("cache", &*self.cache.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WeatherClientConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.secondary_url.contains("/v2/"));
        assert!(config.primary_url.contains("/v1/"));
    }

    #[test]
    fn test_locations_before_first_fetch() {
        let client = WeatherClient::new(WeatherClientConfig::default()).unwrap();
        let locations = client.available_locations();
        assert_eq!(locations.len(), 34);
        assert_eq!(locations[0], "Ang Mo Kio");
        assert!(client.is_valid_location(Some("Sengkang")));
        assert!(!client.is_valid_location(Some("")));
    }

    #[test]
    fn test_status_before_first_fetch() {
        let client = WeatherClient::new(WeatherClientConfig::default()).unwrap();
        let status = client.cache_status();
        assert!(!status.complete_cached);
        assert_eq!(status.known_locations, 34);
    }
}
