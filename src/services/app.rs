// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application controller.
//!
//! Owns the authoritative workout list and drives the session through its
//! phases:
//!
//! ```text
//! AwaitingPosition ──ok──▶ MapReady ◀──submit──┐
//!        │                    │                 │
//!      error               click map         FormOpen
//!        ▼                    └────────────────▶┘
//! PositionUnavailable
//! ```

use crate::config::{Config, DEFAULT_MAP_ZOOM};
use crate::db::WorkoutStorage;
use crate::error::{AppError, Result};
use crate::models::{
    Coordinates, FormState, IdGenerator, Workout, WorkoutForm, WorkoutId, WorkoutKind,
};
use crate::services::geolocation::{GeolocationError, Geolocator};
use crate::services::map::{MapSurface, MapView, MarkerLayer, PanOptions};
use crate::services::render::{marker_for, WorkoutEntry, WorkoutList};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    AwaitingPosition,
    /// Terminal until the session is reset.
    PositionUnavailable,
    MapReady,
    FormOpen {
        at: Coordinates,
    },
}

impl Phase {
    fn map_ready(&self) -> bool {
        matches!(self, Phase::MapReady | Phase::FormOpen { .. })
    }
}

/// Controller tunables.
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub zoom: u8,
    pub pan_duration_secs: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_MAP_ZOOM,
            pan_duration_secs: 1.0,
        }
    }
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            zoom: config.map_zoom,
            ..Self::default()
        }
    }
}

/// The workout application for one session.
pub struct App<M = MarkerLayer> {
    phase: Phase,
    map: M,
    storage: WorkoutStorage,
    workouts: Vec<Workout>,
    list: WorkoutList,
    form: FormState,
    ids: IdGenerator,
    settings: AppSettings,
}

impl<M: MapSurface> App<M> {
    /// Start a session, rendering any persisted workouts into the list.
    ///
    /// Markers for them are placed once the map is initialized.
    pub fn new(map: M, storage: WorkoutStorage, settings: AppSettings) -> Self {
        let mut app = Self {
            phase: Phase::AwaitingPosition,
            map,
            storage,
            workouts: Vec::new(),
            list: WorkoutList::new(),
            form: FormState::default(),
            ids: IdGenerator::default(),
            settings,
        };
        app.restore();
        app
    }

    fn restore(&mut self) {
        self.workouts = self.storage.load();
        for workout in &self.workouts {
            self.ids.observe(workout.id());
            self.list.insert(WorkoutEntry::for_workout(workout));
        }
        if !self.workouts.is_empty() {
            tracing::info!(count = self.workouts.len(), "Restored persisted workouts");
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// List entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &WorkoutEntry> {
        self.list.entries()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Request a position and resolve the session with it.
    pub async fn start(&mut self, geolocator: &dyn Geolocator) -> Result<()> {
        let position = geolocator.current_position().await;
        self.resolve_position(position)
    }

    /// Finish the position request.
    ///
    /// On success the map is centred on the position and every known workout
    /// gets a marker. On failure the session stays without a map.
    pub fn resolve_position(
        &mut self,
        position: std::result::Result<Coordinates, GeolocationError>,
    ) -> Result<()> {
        if self.phase != Phase::AwaitingPosition {
            return Err(AppError::Conflict(
                "no position request is pending".to_string(),
            ));
        }

        match position {
            Ok(center) => {
                self.map.set_view(MapView {
                    center,
                    zoom: self.settings.zoom,
                    pan: None,
                });
                for workout in &self.workouts {
                    self.map.place_marker(marker_for(workout));
                }
                self.phase = Phase::MapReady;
                tracing::info!(
                    lat = center.lat,
                    lng = center.lng,
                    markers = self.workouts.len(),
                    "Map ready"
                );
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::PositionUnavailable;
                tracing::warn!(error = %e, "Could not get position");
                Err(AppError::PositionUnavailable(e.to_string()))
            }
        }
    }

    /// Open the entry form for a clicked map coordinate.
    pub fn click_map(&mut self, at: Coordinates) -> Result<&FormState> {
        if !self.phase.map_ready() {
            return Err(AppError::MapNotReady);
        }
        self.phase = Phase::FormOpen { at };
        self.form.show();
        Ok(&self.form)
    }

    /// Switch the form between cadence and elevation input.
    pub fn change_type(&mut self, kind: WorkoutKind) -> &FormState {
        self.form.select(kind);
        &self.form
    }

    /// Submit the entry form.
    pub fn submit(&mut self, form: WorkoutForm) -> Result<&Workout> {
        self.submit_at(form, Utc::now())
    }

    /// Submit the entry form with an explicit creation time.
    pub fn submit_at(&mut self, form: WorkoutForm, now: DateTime<Utc>) -> Result<&Workout> {
        let Phase::FormOpen { at } = self.phase else {
            return Err(AppError::FormClosed);
        };

        let draft = form.validate();
        self.form.fields = form;
        let draft = draft.inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected workout form");
        })?;

        let workout = draft.into_workout(self.ids.next(now), now, at);
        self.list.insert(WorkoutEntry::for_workout(&workout));
        self.map.place_marker(marker_for(&workout));

        let index = self.workouts.len();
        self.workouts.push(workout);
        if let Err(e) = self.storage.save(&self.workouts) {
            tracing::error!(error = %e, "Failed to persist workouts");
        }

        self.form.hide();
        self.phase = Phase::MapReady;

        let workout = &self.workouts[index];
        tracing::info!(
            id = %workout.id(),
            kind = %workout.kind(),
            distance_km = workout.distance(),
            "Workout created"
        );
        Ok(workout)
    }

    /// Pan the map to a listed workout.
    ///
    /// Unknown ids, or a map that is not ready, leave everything unchanged.
    pub fn select(&mut self, id: WorkoutId) -> Option<&Workout> {
        if !self.phase.map_ready() {
            return None;
        }
        let workout = self.workouts.iter().find(|w| w.id() == id)?;
        self.map.set_view(MapView {
            center: workout.coords(),
            zoom: self.settings.zoom,
            pan: Some(PanOptions {
                animate: true,
                duration_secs: self.settings.pan_duration_secs,
            }),
        });
        Some(workout)
    }

    /// Forget every workout and start a new session.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.clear()?;
        self.workouts.clear();
        self.list.clear();
        self.map.clear();
        self.form = FormState::default();
        self.phase = Phase::AwaitingPosition;
        tracing::info!("Workouts reset");
        Ok(())
    }
}
