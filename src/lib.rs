// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Mapper: log runs and rides on a map
//!
//! This crate provides the workout model, its persistence, and the
//! application controller behind a small map-based workout journal, plus the
//! HTTP API the browser page talks to.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{KeyValueStore, WorkoutStorage};
use error::Result;
use services::{App, AppSettings, DeviceGeolocator, Geolocator, MarkerLayer, StaticGeolocator};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The single controller; every handler runs one operation under this lock.
    pub app: Mutex<App<MarkerLayer>>,
    pub geolocator: Arc<dyn Geolocator>,
    /// Set when positions come from the client rather than configuration.
    pub device_position: Option<Arc<DeviceGeolocator>>,
    /// Number of the latest position request; older answers are dropped.
    position_request: AtomicU64,
    position_task: std::sync::Mutex<Option<AbortHandle>>,
}

impl AppState {
    /// Build the state, restoring workouts from `store`.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let app = App::new(
            MarkerLayer::new(),
            WorkoutStorage::new(store),
            AppSettings::from(&config),
        );

        let (geolocator, device_position) = match config.home_position {
            Some(home) => {
                let geolocator: Arc<dyn Geolocator> = Arc::new(StaticGeolocator::new(home));
                (geolocator, None)
            }
            None => {
                let device = Arc::new(DeviceGeolocator::new());
                let geolocator: Arc<dyn Geolocator> = device.clone();
                (geolocator, Some(device))
            }
        };

        Self {
            config,
            app: Mutex::new(app),
            geolocator,
            device_position,
            position_request: AtomicU64::new(0),
            position_task: std::sync::Mutex::new(None),
        }
    }

    /// Ask for the current position in the background and resolve the
    /// session with the answer. The controller lock is not held while waiting.
    ///
    /// Only the most recent request may resolve the session.
    pub fn spawn_position_request(self: &Arc<Self>) -> JoinHandle<()> {
        let request = self.position_request.fetch_add(1, Ordering::SeqCst) + 1;
        let state = Arc::clone(self);
        let task = tokio::spawn(async move {
            let position = state.geolocator.current_position().await;
            let mut app = state.app.lock().await;
            if state.position_request.load(Ordering::SeqCst) != request {
                tracing::debug!(request, "Dropping answer to a superseded position request");
                return;
            }
            if let Err(e) = app.resolve_position(position) {
                tracing::warn!(error = %e, "Position request did not open the map");
            }
        });
        *self.position_task() = Some(task.abort_handle());
        task
    }

    fn position_task(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        self.position_task.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Delete all workouts and start a new session waiting for a position.
    ///
    /// The pending request is superseded under the controller lock, so its
    /// answer can no longer touch the new session.
    pub async fn reset_session(self: &Arc<Self>) -> Result<JoinHandle<()>> {
        let mut app = self.app.lock().await;
        app.reset()?;
        if let Some(previous) = self.position_task().take() {
            previous.abort();
        }
        if let Some(device) = &self.device_position {
            device.cancel();
        }
        Ok(self.spawn_position_request())
    }
}
