//! Upstream forecast sources.

use crate::types::{ForecastEnvelope, ForecastPayload, WeatherError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// data.gov.sg v2 real-time endpoint; tried first.
pub const SECONDARY_URL: &str = "https://api-open.data.gov.sg/v2/real-time/api/two-hr-forecast";
/// data.gov.sg v1 endpoint; fallback.
pub const PRIMARY_URL: &str = "https://api.data.gov.sg/v1/environment/2-hour-weather-forecast";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("OneST/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client used by every source.
pub fn http_client(timeout: Duration) -> Result<Client, WeatherError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// One upstream forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastSource {
    name: &'static str,
    url: String,
    client: Arc<Client>,
}

impl ForecastSource {
    pub fn new(name: &'static str, url: impl Into<String>, client: Arc<Client>) -> Self {
        Self {
            name,
            url: url.into(),
            client,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the current forecast.
    ///
    /// Non-2xx statuses and bodies that are not a JSON object are errors.
    pub async fn fetch(&self) -> Result<ForecastPayload, WeatherError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                source_name: self.name,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let envelope: ForecastEnvelope = serde_json::from_slice(&body)
            .map_err(|e| WeatherError::Parse(format!("{} source: {}", self.name, e)))?;

        Ok(envelope.into_payload())
    }
}
