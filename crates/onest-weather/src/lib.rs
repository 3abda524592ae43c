//! Two-hour weather forecast client for OneST
//!
//! Fetches Singapore's 2-hour forecast from data.gov.sg with a secondary ->
//! primary source fallback, caches it in memory and narrows it to individual
//! locations on request.

pub mod types;
pub mod cache;
pub mod client;
pub mod filter;
pub mod location;
pub mod observer;
pub mod provider;

pub use types::*;
pub use cache::{CacheEntry, WeatherCache, DEFAULT_TTL};
pub use client::{WeatherClient, WeatherClientConfig};
pub use filter::filter_by_location;
pub use location::{matches_known_location, KNOWN_LOCATIONS};
pub use observer::{CacheSlot, ForecastObserver, NoopObserver, TracingObserver};
pub use provider::ForecastSource;
