// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering of workouts into list entries and map markers.

use crate::models::{Workout, WorkoutId, WorkoutKind, WorkoutMetrics};
use crate::services::map::{Marker, PopupOptions};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Write;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const POPUP_MAX_WIDTH: u32 = 250;
const POPUP_MIN_WIDTH: u32 = 100;

/// One icon/value/unit row of a list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Detail {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl Detail {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// A rendered workout in the sidebar list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutEntry {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub details: Vec<Detail>,
}

impl WorkoutEntry {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut details = vec![
            Detail::new(kind.icon(), format_number(workout.distance()), "km"),
            Detail::new("⏱", format_number(workout.duration()), "min"),
        ];

        match workout.metrics() {
            WorkoutMetrics::Running { cadence, pace } => {
                details.push(Detail::new("⚡️", format_tenths(pace), "min/km"));
                details.push(Detail::new("🦶🏼", format_number(cadence), "spm"));
            }
            WorkoutMetrics::Cycling {
                elevation_gain,
                speed,
            } => {
                details.push(Detail::new("⚡️", format_tenths(speed), "km/h"));
                details.push(Detail::new("⛰", format_number(elevation_gain), "m"));
            }
        }

        Self {
            id: workout.id(),
            kind,
            title: workout.description().to_string(),
            details,
        }
    }

    /// `<li>` markup for the workout list.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<li class=\"workout workout--{}\" data-id=\"{}\">\n  <h2 class=\"workout__title\">{}</h2>\n",
            self.kind,
            self.id,
            escape_html(&self.title)
        );
        for detail in &self.details {
            // Writing to a String cannot fail.
            let _ = write!(
                html,
                "  <div class=\"workout__details\">\n    <span class=\"workout__icon\">{}</span>\n    <span class=\"workout__value\">{}</span>\n    <span class=\"workout__unit\">{}</span>\n  </div>\n",
                detail.icon,
                escape_html(&detail.value),
                detail.unit
            );
        }
        html.push_str("</li>");
        html
    }
}

/// Marker with an open, sticky popup for `workout`.
pub fn marker_for(workout: &Workout) -> Marker {
    let kind = workout.kind();
    Marker {
        workout_id: workout.id(),
        kind,
        coords: workout.coords(),
        popup: PopupOptions {
            max_width: POPUP_MAX_WIDTH,
            min_width: POPUP_MIN_WIDTH,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind),
            content: format!("{} {}", kind.icon(), workout.description()),
        },
    }
}

/// Print a raw number the way a browser would: `5`, `5.5`, `-40`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Drops the sign of negative zero.
        return "0".to_string();
    }
    value.to_string()
}

/// One decimal place with exact halves rounded away from zero, as
/// `Number.prototype.toFixed(1)` does.
pub fn format_tenths(value: f64) -> String {
    // Only multiples of 0.25 sit exactly halfway between two tenths.
    let halfway = (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    if halfway {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{:.1}", value)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Rendered entries, newest first.
///
/// Each entry is inserted right below the form, so the most recently rendered
/// workout is always at the top.
#[derive(Debug, Default, Clone)]
pub struct WorkoutList {
    entries: VecDeque<WorkoutEntry>,
}

impl WorkoutList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: WorkoutEntry) {
        self.entries.push_front(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &WorkoutEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
