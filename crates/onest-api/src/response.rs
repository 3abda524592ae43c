//! Uniform JSON envelope shared by every route.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// `{ "success": false, "error": { ... } }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: &'static str,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: &'static str, message: &'static str, details: Option<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code,
                message,
                details,
                timestamp: Utc::now(),
            },
        }
    }
}
