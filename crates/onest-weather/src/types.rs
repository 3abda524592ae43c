use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Two-hour forecast as returned by data.gov.sg.
///
/// Only the fields the client inspects are typed; everything else the
/// upstream sends (`api_info`, `code`, ...) is kept in `extra` and written
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_metadata: Option<Vec<AreaMetadata>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ForecastItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ForecastPayload {
    /// Sorted, de-duplicated area names from `area_metadata`.
    ///
    /// Returns `None` when the payload carries no metadata.
    pub fn area_names(&self) -> Option<Vec<String>> {
        let metadata = self.area_metadata.as_ref().filter(|m| !m.is_empty())?;
        let mut names: Vec<String> = metadata.iter().map(|area| area.name.clone()).collect();
        names.sort();
        names.dedup();
        Some(names)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_location: Option<LabelLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_period: Option<ValidPeriod>,
    #[serde(default)]
    pub forecasts: Vec<AreaForecast>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Forecast for a single area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaForecast {
    pub area: String,
    /// A plain string on v1, `{ "code", "text" }` on v2.
    #[serde(default)]
    pub forecast: Value,
}

/// Upstream response body.
///
/// Some endpoints wrap the payload as `{ "code": 0, "data": { .. } }`,
/// others return it bare. When `data` is present it wins; otherwise the body
/// itself is the payload.
#[derive(Debug, Deserialize)]
pub struct ForecastEnvelope {
    #[serde(default)]
    data: Option<ForecastPayload>,
    #[serde(flatten)]
    body: ForecastPayload,
}

impl ForecastEnvelope {
    pub fn into_payload(self) -> ForecastPayload {
        self.data.unwrap_or(self.body)
    }
}

/// Snapshot of a client's cache, for health reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatus {
    pub complete_cached: bool,
    pub complete_fresh: bool,
    pub fetched_at: Option<DateTime<Utc>>,
    pub age_seconds: Option<i64>,
    pub location_entries: usize,
    pub known_locations: usize,
    pub ttl_seconds: u64,
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{source_name} source returned HTTP {status}")]
    Status { source_name: &'static str, status: u16 },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("All weather sources failed (secondary: {secondary}; primary: {primary})")]
    AllSourcesFailed {
        secondary: Box<WeatherError>,
        primary: Box<WeatherError>,
    },
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) if e.is_timeout() => "The weather service timed out. Please try again.",
            Self::Network(_) => "Unable to reach the weather service.",
            Self::Status { .. } => "The weather service returned an error.",
            Self::Parse(_) => "The weather service returned an unexpected response.",
            Self::AllSourcesFailed { .. } => {
                "Weather data is temporarily unavailable. Please try again later."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn sample_payload() -> Value {
        serde_json::json!({
            "area_metadata": [
                {"name": "Bedok", "label_location": {"latitude": 1.321, "longitude": 103.924}},
                {"name": "Ang Mo Kio", "label_location": {"latitude": 1.375, "longitude": 103.839}}
            ],
            "items": [{
                "update_timestamp": "2026-10-19T10:08:51+08:00",
                "valid_period": {"start": "2026-10-19T10:00:00+08:00", "end": "2026-10-19T12:00:00+08:00"},
                "forecasts": [
                    {"area": "Ang Mo Kio", "forecast": "Partly Cloudy (Day)"},
                    {"area": "Bedok", "forecast": "Light Showers"}
                ]
            }],
            "api_info": {"status": "healthy"}
        })
    }

    #[test]
    fn test_bare_body_is_payload() {
        let envelope: ForecastEnvelope = serde_json::from_value(sample_payload()).unwrap();
        let payload = envelope.into_payload();
        assert_eq!(payload.items.as_ref().unwrap().len(), 1);
        assert_eq!(payload.extra["api_info"]["status"], "healthy");
    }

    #[test]
    fn test_wrapped_body_unwraps_data() {
        let body = serde_json::json!({"code": 0, "data": sample_payload(), "errorMsg": ""});
        let envelope: ForecastEnvelope = serde_json::from_value(body).unwrap();
        let payload = envelope.into_payload();
        assert_eq!(payload.area_metadata.as_ref().unwrap().len(), 2);
        assert!(payload.extra.get("code").is_none());
    }

    #[test]
    fn test_passthrough_fields_survive_round_trip() {
        let payload: ForecastPayload = serde_json::from_value(sample_payload()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["items"][0]["update_timestamp"], "2026-10-19T10:08:51+08:00");
        assert_eq!(json["api_info"]["status"], "healthy");
    }

    #[test]
    fn test_area_names_sorted() {
        let payload: ForecastPayload = serde_json::from_value(sample_payload()).unwrap();
        assert_eq!(
            payload.area_names(),
            Some(vec!["Ang Mo Kio".to_string(), "Bedok".to_string()])
        );
        assert_eq!(ForecastPayload::default().area_names(), None);
    }

    #[test]
    fn test_unread_fields_are_optional() {
        let body = serde_json::json!({
            "area_metadata": [{"name": "Bedok"}],
            "items": [{
                "forecasts": [{"area": "Bedok", "forecast": {"code": "CL", "text": "Cloudy"}}]
            }, {
                "valid_period": {"text": "10 am to 12 pm"},
                "forecasts": [{"area": "Bedok", "forecast": "Showers"}]
            }]
        });
        let envelope: ForecastEnvelope = serde_json::from_value(body.clone()).unwrap();
        let payload = envelope.into_payload();

        let items = payload.items.as_ref().unwrap();
        assert_eq!(items[0].valid_period, None);
        assert_eq!(items[1].valid_period.as_ref().unwrap().start, None);
        assert_eq!(payload.area_metadata.as_ref().unwrap()[0].label_location, None);
        assert_eq!(payload.area_names(), Some(vec!["Bedok".to_string()]));

        // Nothing is invented on the way back out.
        assert_eq!(serde_json::to_value(&payload).unwrap(), body);
    }

    #[test]
    fn test_all_sources_failed_names_both() {
        let err = WeatherError::AllSourcesFailed {
            secondary: Box::new(WeatherError::Status { source_name: "secondary", status: 503 }),
            primary: Box::new(WeatherError::Parse("expected value".into())),
        };
        let message = err.to_string();
        assert!(message.contains("secondary source returned HTTP 503"));
        assert!(message.contains("expected value"));
    }
}
