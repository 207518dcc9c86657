// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::db::StoreError;
use crate::models::FormError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Alert shown when a submitted form fails validation.
pub const INVALID_INPUT_ALERT: &str = "Your Input is invalid, sorry";

/// Alert shown when the device position cannot be obtained.
pub const POSITION_ALERT: &str = "Could not get your position";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid workout input")]
    InvalidInput,

    #[error("Unknown workout type: {0}")]
    UnknownWorkoutType(String),

    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Map is not ready")]
    MapNotReady,

    #[error("Workout form is not open")]
    FormClosed,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Blocking message for the user, if this error is one they should see.
    pub fn alert(&self) -> Option<String> {
        match self {
            AppError::InvalidInput => Some(INVALID_INPUT_ALERT.to_string()),
            AppError::UnknownWorkoutType(kind) => {
                Some(format!("Unknown workout type \"{}\"", kind))
            }
            AppError::PositionUnavailable(_) => Some(POSITION_ALERT.to_string()),
            AppError::MapNotReady => Some("The map is still loading".to_string()),
            AppError::FormClosed => Some("Click on the map to add a workout".to_string()),
            _ => None,
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::UnknownKind(kind) => AppError::UnknownWorkoutType(kind.0),
            FormError::Invalid => AppError::InvalidInput,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let alert = self.alert();
        let (status, error, details) = match &self {
            AppError::InvalidInput => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input", None),
            AppError::UnknownWorkoutType(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unknown_workout_type", None)
            }
            AppError::PositionUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "position_unavailable",
                Some(msg.clone()),
            ),
            AppError::MapNotReady => (StatusCode::CONFLICT, "map_not_ready", None),
            AppError::FormClosed => (StatusCode::CONFLICT, "form_closed", None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            alert,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
