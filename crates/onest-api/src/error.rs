use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use onest_core::AppError;
use onest_weather::WeatherError;
use thiserror::Error;

use crate::response::ErrorResponse;

/// Handler error: an [`AppError`] that knows its HTTP status.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AppError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(AppError::Weather(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::MissingParameter(_) | AppError::InvalidLocation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Weather(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Io(_) | AppError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Upstream failures keep their detail; other server errors only
        // expose the generic message.
        let details = if status.is_server_error() {
            tracing::error!(code = self.0.code(), "Request failed: {}", self.0);
            match &self.0 {
                AppError::Weather(e) => Some(e.to_string()),
                _ => None,
            }
        } else {
            tracing::debug!(code = self.0.code(), "Request rejected: {}", self.0);
            Some(self.0.to_string())
        };

        let body = ErrorResponse::new(self.0.code(), self.0.user_message(), details);
        (status, Json(body)).into_response()
    }
}
