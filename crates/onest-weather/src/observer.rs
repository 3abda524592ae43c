//! Hooks invoked by [`WeatherClient`](crate::WeatherClient) at fixed points.

use crate::types::WeatherError;

/// Which cache slot a lookup touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSlot<'a> {
    Complete,
    Location(&'a str),
}

impl std::fmt::Display for CacheSlot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheSlot::Complete => write!(f, "complete"),
            CacheSlot::Location(location) => write!(f, "location:{}", location),
        }
    }
}

/// Observer for cache and source events. All methods default to no-ops.
pub trait ForecastObserver: Send + Sync {
    fn cache_hit(&self, _slot: CacheSlot<'_>) {}

    fn cache_miss(&self, _slot: CacheSlot<'_>) {}

    fn source_attempt(&self, _source: &str) {}

    fn source_failure(&self, _source: &str, _error: &WeatherError) {}

    fn source_success(&self, _source: &str) {}
}

/// Emits every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ForecastObserver for TracingObserver {
    fn cache_hit(&self, slot: CacheSlot<'_>) {
        tracing::debug!(%slot, "Weather cache hit");
    }

    fn cache_miss(&self, slot: CacheSlot<'_>) {
        tracing::debug!(%slot, "Weather cache miss");
    }

    fn source_attempt(&self, source: &str) {
        tracing::info!(source, "Fetching weather forecast");
    }

    fn source_failure(&self, source: &str, error: &WeatherError) {
        tracing::warn!(source, error = %error, "Weather source failed");
    }

    fn source_success(&self, source: &str) {
        tracing::info!(source, "Weather forecast fetched");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ForecastObserver for NoopObserver {}
