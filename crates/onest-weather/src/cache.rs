//! In-memory forecast cache: one complete slot plus one slot per location.
//!
//! Entries are replaced wholesale on every store. Freshness is judged at read
//! time; nothing is evicted in the background.

use crate::location::KNOWN_LOCATIONS;
use crate::types::{CacheStatus, ForecastPayload};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Default time-to-live for cached forecasts.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached forecast and when it was fetched.
///
/// `data.is_some()` implies `timestamp.is_some()`; the constructors keep it so.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheEntry {
    pub data: Option<ForecastPayload>,
    pub timestamp: Option<DateTime<Utc>>,
    pub locations: Option<Vec<String>>,
}

impl CacheEntry {
    pub fn new(data: ForecastPayload, now: DateTime<Utc>) -> Self {
        Self {
            data: Some(data),
            timestamp: Some(now),
            locations: None,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.timestamp.map(|ts| now.signed_duration_since(ts))
    }

    pub fn is_fresh(&self, ttl: TimeDelta, now: DateTime<Utc>) -> bool {
        self.data.is_some() && self.age(now).is_some_and(|age| age < ttl)
    }
}

#[derive(Debug)]
pub struct WeatherCache {
    ttl: Duration,
    complete: CacheEntry,
    by_location: HashMap<String, CacheEntry>,
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            complete: CacheEntry::default(),
            by_location: HashMap::new(),
        }
    }

    fn ttl_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.ttl).unwrap_or(TimeDelta::MAX)
    }

    /// The complete forecast, if one is cached and younger than the TTL.
    pub fn complete_if_fresh(&self, now: DateTime<Utc>) -> Option<ForecastPayload> {
        if self.complete.is_fresh(self.ttl_delta(), now) {
            self.complete.data.clone()
        } else {
            None
        }
    }

    /// The filtered forecast for `location` (exact key), if fresh.
    pub fn location_if_fresh(&self, location: &str, now: DateTime<Utc>) -> Option<ForecastPayload> {
        let ttl = self.ttl_delta();
        self.by_location
            .get(location)
            .filter(|entry| entry.is_fresh(ttl, now))
            .and_then(|entry| entry.data.clone())
    }

    /// Replace the complete slot and recompute the known location names.
    pub fn store_complete(&mut self, payload: ForecastPayload, now: DateTime<Utc>) {
        let locations = payload.area_names().unwrap_or_else(static_locations);
        self.complete = CacheEntry {
            data: Some(payload),
            timestamp: Some(now),
            locations: Some(locations),
        };
    }

    pub fn store_location(&mut self, location: &str, payload: ForecastPayload, now: DateTime<Utc>) {
        self.by_location
            .insert(location.to_string(), CacheEntry::new(payload, now));
    }

    /// Location names from the last successful fetch, if any.
    pub fn known_locations(&self) -> Option<&[String]> {
        self.complete.locations.as_deref()
    }

    pub fn clear(&mut self) {
        self.complete = CacheEntry::default();
        self.by_location.clear();
    }

    pub fn status(&self, now: DateTime<Utc>) -> CacheStatus {
        CacheStatus {
            complete_cached: self.complete.data.is_some(),
            complete_fresh: self.complete.is_fresh(self.ttl_delta(), now),
            fetched_at: self.complete.timestamp,
            age_seconds: self.complete.age(now).map(|age| age.num_seconds()),
            location_entries: self.by_location.len(),
            known_locations: self
                .known_locations()
                .map_or(KNOWN_LOCATIONS.len(), <[String]>::len),
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

fn static_locations() -> Vec<String> {
    let mut names: Vec<String> = KNOWN_LOCATIONS.iter().map(|name| name.to_string()).collect();
    names.sort();
    names
}
