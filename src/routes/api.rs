// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes driving the workout controller.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, FormState, WorkoutForm, WorkoutId, WorkoutKind};
use crate::services::geolocation::GeolocationError;
use crate::services::{MapView, Phase, WorkoutEntry};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/position", post(report_position))
        .route("/api/map", get(get_map))
        .route("/api/map/click", post(click_map))
        .route("/api/form/type", put(change_type))
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/{id}/select", post(select_workout))
        .route("/api/reset", post(reset))
}

// ─── Session State ───────────────────────────────────────────

/// A list entry with its ready-to-insert markup.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EntryResponse {
    #[serde(flatten)]
    pub entry: WorkoutEntry,
    pub html: String,
}

impl From<&WorkoutEntry> for EntryResponse {
    fn from(entry: &WorkoutEntry) -> Self {
        Self {
            html: entry.to_html(),
            entry: entry.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub phase: Phase,
    pub form: FormState,
    /// Newest first.
    pub workouts: Vec<EntryResponse>,
}

/// Current phase, form and workout list.
async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let app = state.app.lock().await;
    Json(StateResponse {
        phase: app.phase(),
        form: app.form().clone(),
        workouts: app.entries().map(EntryResponse::from).collect(),
    })
}

// ─── Geolocation ─────────────────────────────────────────────

/// Answer from the device's geolocation API.
#[derive(Debug, Deserialize, Validate)]
struct PositionReport {
    #[validate(range(min = -90.0, max = 90.0))]
    latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    longitude: Option<f64>,
    /// Set instead of coordinates when the lookup failed; `"denied"` for a
    /// refused permission.
    error: Option<String>,
}

impl PositionReport {
    fn into_position(self) -> Result<std::result::Result<Coordinates, GeolocationError>> {
        match (self.error, self.latitude, self.longitude) {
            (Some(error), _, _) if error == "denied" => Ok(Err(GeolocationError::Denied)),
            (Some(error), _, _) => Ok(Err(GeolocationError::Unavailable(error))),
            (None, Some(lat), Some(lng)) => Ok(Ok(Coordinates::new(lat, lng))),
            (None, _, _) => Err(AppError::BadRequest(
                "Either 'latitude' and 'longitude' or 'error' is required".to_string(),
            )),
        }
    }
}

/// Resolve the pending position request with the device's answer.
async fn report_position(
    State(state): State<Arc<AppState>>,
    Json(report): Json<PositionReport>,
) -> Result<StatusCode> {
    report
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let device = state.device_position.as_ref().ok_or_else(|| {
        AppError::Conflict("Position is fixed by server configuration".to_string())
    })?;
    let position = report.into_position()?;

    let app = state.app.lock().await;
    if app.phase() != Phase::AwaitingPosition {
        return Err(AppError::Conflict(
            "No position request is pending".to_string(),
        ));
    }
    tracing::debug!(ok = position.is_ok(), "Device reported position");
    device.report(position);

    Ok(StatusCode::ACCEPTED)
}

// ─── Map ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MapResponse {
    pub view: Option<MapView>,
    pub markers: geojson::FeatureCollection,
}

/// Current view and all markers as GeoJSON.
async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapResponse> {
    let app = state.app.lock().await;
    Json(MapResponse {
        view: app.map().view(),
        markers: app.map().to_geojson(),
    })
}

#[derive(Debug, Deserialize, Validate)]
struct MapClick {
    #[validate(range(min = -90.0, max = 90.0))]
    lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    lng: f64,
}

/// Open the entry form at the clicked coordinate.
async fn click_map(
    State(state): State<Arc<AppState>>,
    Json(click): Json<MapClick>,
) -> Result<Json<FormState>> {
    click
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut app = state.app.lock().await;
    let form = app.click_map(Coordinates::new(click.lat, click.lng))?;
    Ok(Json(form.clone()))
}

// ─── Form ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TypeChange {
    #[serde(rename = "type")]
    kind: String,
}

/// Switch the form between running and cycling inputs.
async fn change_type(
    State(state): State<Arc<AppState>>,
    Json(change): Json<TypeChange>,
) -> Result<Json<FormState>> {
    let kind: WorkoutKind = change
        .kind
        .parse()
        .map_err(|e: crate::models::workout::UnknownKind| AppError::UnknownWorkoutType(e.0))?;

    let mut app = state.app.lock().await;
    Ok(Json(app.change_type(kind).clone()))
}

// ─── Workouts ────────────────────────────────────────────────

/// Rendered workout list, newest first.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<EntryResponse>> {
    let app = state.app.lock().await;
    Json(app.entries().map(EntryResponse::from).collect())
}

/// Submit the entry form.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(form): Json<WorkoutForm>,
) -> Result<(StatusCode, Json<EntryResponse>)> {
    let mut app = state.app.lock().await;
    let workout = app.submit(form)?;
    let entry = WorkoutEntry::for_workout(workout);

    Ok((StatusCode::CREATED, Json(EntryResponse::from(&entry))))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SelectResponse {
    /// False when the id is unknown or the map is not ready.
    pub moved: bool,
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub view: Option<MapView>,
}

/// Pan the map to a listed workout.
async fn select_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<SelectResponse> {
    let mut app = state.app.lock().await;
    let moved = app.select(WorkoutId(id)).is_some();
    if !moved {
        tracing::debug!(id, "Selected workout not found");
    }

    Json(SelectResponse {
        moved,
        view: app.map().view(),
    })
}

// ─── Reset ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

/// Delete all workouts and start a fresh session.
async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<ResetResponse>> {
    state.reset_session().await?;

    Ok(Json(ResetResponse {
        success: true,
        message: "All workouts removed. Waiting for position.".to_string(),
    }))
}
