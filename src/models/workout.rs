// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout records and their persisted representation.

use crate::time_utils::month_day;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Ids keep the last ten decimal digits of the creation timestamp (ms).
const ID_MODULUS: u64 = 10_000_000_000;

/// A latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// GeoJSON and `geo` use (x, y) = (longitude, latitude).
impl From<Coordinates> for geo::Point<f64> {
    fn from(c: Coordinates) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

/// Unique workout identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WorkoutId(pub u64);

/// Accepts a number or a decimal string; older saved lists store ids as text.
impl<'de> Deserialize<'de> for WorkoutId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(WorkoutId(id)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(WorkoutId)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues workout ids from the wall clock, never repeating one it has seen.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    /// Record an id that already exists (e.g. restored from storage).
    pub fn observe(&mut self, id: WorkoutId) {
        self.last = Some(self.last.map_or(id.0, |last| last.max(id.0)));
    }

    /// Next id for a workout created at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let candidate = now.timestamp_millis().max(0) as u64 % ID_MODULUS;
        let id = match self.last {
            Some(last) if candidate <= last => last + 1,
            _ => candidate,
        };
        self.last = Some(id);
        WorkoutId(id)
    }
}

/// Activity kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    #[default]
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected activity type string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown workout type: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Kind-specific inputs and the metric derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutMetrics {
    /// `pace` in min/km.
    Running { cadence: f64, pace: f64 },
    /// `speed` in km/h.
    Cycling { elevation_gain: f64, speed: f64 },
}

/// A single logged activity.
///
/// Every field except the interaction counter is fixed at construction;
/// derived values are computed once in the constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    date: DateTime<Utc>,
    coords: Coordinates,
    distance: f64,
    duration: f64,
    description: String,
    clicks: u32,
    metrics: WorkoutMetrics,
}

impl Workout {
    /// Build a running workout. Inputs are expected to be validated already.
    pub fn running(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        let pace = duration / cadence;
        Self::build(
            id,
            date,
            coords,
            distance,
            duration,
            WorkoutMetrics::Running { cadence, pace },
        )
    }

    /// Build a cycling workout. Inputs are expected to be validated already.
    pub fn cycling(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        let speed = distance / (duration / 60.0);
        Self::build(
            id,
            date,
            coords,
            distance,
            duration,
            WorkoutMetrics::Cycling {
                elevation_gain,
                speed,
            },
        )
    }

    fn build(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        metrics: WorkoutMetrics,
    ) -> Self {
        let kind = match metrics {
            WorkoutMetrics::Running { .. } => WorkoutKind::Running,
            WorkoutMetrics::Cycling { .. } => WorkoutKind::Cycling,
        };
        Self {
            id,
            date,
            coords,
            distance,
            duration,
            description: format!("{} on {}", kind.label(), month_day(date)),
            clicks: 0,
            metrics,
        }
    }

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    /// Distance in km.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Duration in minutes.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metrics(&self) -> WorkoutMetrics {
        self.metrics
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.metrics {
            WorkoutMetrics::Running { .. } => WorkoutKind::Running,
            WorkoutMetrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace in min/km; `None` for cycling.
    pub fn pace(&self) -> Option<f64> {
        match self.metrics {
            WorkoutMetrics::Running { pace, .. } => Some(pace),
            WorkoutMetrics::Cycling { .. } => None,
        }
    }

    /// Speed in km/h; `None` for running.
    pub fn speed(&self) -> Option<f64> {
        match self.metrics {
            WorkoutMetrics::Cycling { speed, .. } => Some(speed),
            WorkoutMetrics::Running { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.metrics {
            WorkoutMetrics::Running { cadence, .. } => Some(cadence),
            WorkoutMetrics::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.metrics {
            WorkoutMetrics::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutMetrics::Running { .. } => None,
        }
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Count one interaction with this workout.
    ///
    /// Not triggered by list selection.
    pub fn record_click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }
}

/// Plain-data form of a workout as kept in the key-value store.
///
/// Field names match the browser-era `localStorage` blob so existing data
/// keeps loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkout {
    pub id: WorkoutId,
    pub date: DateTime<Utc>,
    pub coords: Coordinates,
    pub distance: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "click")]
    pub clicks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Why a stored object could not be turned back into a workout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RestoreError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),

    #[error("{kind} workout {id} is missing `{field}`")]
    MissingField {
        id: WorkoutId,
        kind: WorkoutKind,
        field: &'static str,
    },
}

impl From<&Workout> for StoredWorkout {
    fn from(w: &Workout) -> Self {
        Self {
            id: w.id,
            date: w.date,
            coords: w.coords,
            distance: w.distance,
            duration: w.duration,
            kind: w.kind().as_str().to_string(),
            description: Some(w.description.clone()),
            clicks: w.clicks,
            cadence: w.cadence(),
            pace: w.pace(),
            elevation_gain: w.elevation_gain(),
            speed: w.speed(),
        }
    }
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = RestoreError;

    /// Rebuild the typed variant from the stored discriminator.
    fn try_from(stored: StoredWorkout) -> Result<Self, Self::Error> {
        let kind: WorkoutKind = stored.kind.parse()?;
        let missing = |field| RestoreError::MissingField {
            id: stored.id,
            kind,
            field,
        };

        let mut workout = match kind {
            WorkoutKind::Running => Workout::running(
                stored.id,
                stored.date,
                stored.coords,
                stored.distance,
                stored.duration,
                stored.cadence.ok_or_else(|| missing("cadence"))?,
            ),
            WorkoutKind::Cycling => Workout::cycling(
                stored.id,
                stored.date,
                stored.coords,
                stored.distance,
                stored.duration,
                stored.elevation_gain.ok_or_else(|| missing("elevationGain"))?,
            ),
        };
        workout.clicks = stored.clicks;
        if let Some(description) = stored.description.filter(|d| !d.is_empty()) {
            // Written at creation time, possibly in the client's local day.
            workout.description = description;
        }
        Ok(workout)
    }
}
