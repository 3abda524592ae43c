use axum::extract::{Query, State};
use axum::http::Uri;
use axum::Json;
use chrono::{DateTime, Utc};
use onest_core::AppError;
use onest_uen::{FormatExamples, ValidationResult};
use onest_weather::{CacheStatus, ForecastPayload};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "onest-portal";

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub weather_cache: CacheStatus,
}

pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthReport>> {
    ApiResponse::ok(HealthReport {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        weather_cache: state.weather.cache_status(),
    })
}

#[derive(Debug, Deserialize)]
pub struct UenQuery {
    pub uen: Option<String>,
}

/// An unrecognised UEN is still a successful lookup; only a missing
/// parameter is rejected.
pub async fn validate_uen(
    Query(query): Query<UenQuery>,
) -> Result<Json<ApiResponse<ValidationResult>>, ApiError> {
    let uen = query.uen.ok_or(AppError::MissingParameter("uen"))?;
    Ok(ApiResponse::ok(onest_uen::classify(Some(&uen))))
}

pub async fn uen_formats() -> Json<ApiResponse<FormatExamples>> {
    ApiResponse::ok(onest_uen::format_examples())
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub location: Option<String>,
    pub forecast: ForecastPayload,
}

pub async fn weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ApiResponse<ForecastResponse>>, ApiError> {
    let location = query
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    if let Some(location) = location.as_deref() {
        if !state.weather.is_valid_location(Some(location)) {
            return Err(AppError::InvalidLocation(location.to_string()).into());
        }
    }

    let forecast = state.weather.get_forecast(location.as_deref()).await?;
    Ok(ApiResponse::ok(ForecastResponse { location, forecast }))
}

pub async fn weather_locations(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    ApiResponse::ok(state.weather.available_locations())
}

pub async fn not_found(uri: Uri) -> ApiError {
    AppError::NotFound(uri.path().to_string()).into()
}
