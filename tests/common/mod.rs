// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use std::sync::Arc;
use tower::ServiceExt;
use workout_mapper::config::Config;
use workout_mapper::db::{KeyValueStore, MemoryStore, WorkoutStorage};
use workout_mapper::models::{Coordinates, WorkoutForm};
use workout_mapper::routes::create_router;
use workout_mapper::services::{App, AppSettings, MarkerLayer};
use workout_mapper::AppState;

/// Position the test configuration resolves to.
#[allow(dead_code)]
pub const HOME: Coordinates = Coordinates {
    lat: 51.505,
    lng: -0.09,
};

/// Create a test app over an in-memory store with a fixed home position.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default(), Arc::new(MemoryStore::new()))
}

/// Create a test app with explicit configuration and store.
#[allow(dead_code)]
pub fn create_test_app_with(
    config: Config,
    store: Arc<dyn KeyValueStore>,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, store));
    (create_router(state.clone()), state)
}

/// A controller over `store` with the map already initialized at [`HOME`].
#[allow(dead_code)]
pub fn ready_app(store: Arc<dyn KeyValueStore>) -> App {
    let mut app = App::new(
        MarkerLayer::new(),
        WorkoutStorage::new(store),
        AppSettings::default(),
    );
    app.resolve_position(Ok(HOME))
        .expect("position should open the map");
    app
}

/// Form values as the page would submit them.
#[allow(dead_code)]
pub fn form(kind: &str, distance: &str, duration: &str, extra: &str) -> WorkoutForm {
    let mut form = WorkoutForm {
        kind: kind.to_string(),
        distance: distance.to_string(),
        duration: duration.to_string(),
        ..WorkoutForm::default()
    };
    if kind == "cycling" {
        form.elevation = extra.to_string();
    } else {
        form.cadence = extra.to_string();
    }
    form
}

/// Send a JSON request through the router.
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a bodyless GET through the router.
#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
