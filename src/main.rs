// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Mapper API Server
//!
//! Records runs and rides at map positions and serves the workout list and
//! markers to the browser page.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_mapper::{config::Config, db::FileStore, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout Mapper API");

    // Open the workout store
    tracing::info!(path = %config.store_path.display(), "Opening workout store");
    let store = Arc::new(FileStore::new(&config.store_path));

    // Build shared state (restores persisted workouts into the list)
    let state = Arc::new(AppState::new(config.clone(), store));
    match config.home_position {
        Some(home) => tracing::info!(lat = home.lat, lng = home.lng, "Using configured position"),
        None => tracing::info!("Waiting for the device to report its position"),
    }

    // The map opens once a position arrives
    state.spawn_position_request();

    // Build router
    let app = workout_mapper::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("workout_mapper=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
