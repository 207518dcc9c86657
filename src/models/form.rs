// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout entry form: raw field values, validation and visible state.

use crate::models::workout::{Coordinates, UnknownKind, Workout, WorkoutId, WorkoutKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Field values exactly as the form surface delivers them.
///
/// Numbers may arrive as JSON strings or JSON numbers; both are kept as text
/// and coerced on validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutForm {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default, deserialize_with = "field_value")]
    pub distance: String,
    #[serde(default, deserialize_with = "field_value")]
    pub duration: String,
    #[serde(default, deserialize_with = "field_value")]
    pub cadence: String,
    #[serde(default, deserialize_with = "field_value")]
    pub elevation: String,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }
}

fn default_kind() -> String {
    WorkoutKind::default().as_str().to_string()
}

fn field_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Why a submitted form was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),

    #[error("Workout inputs must be finite and positive")]
    Invalid,
}

/// Validated inputs for a new workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDraft {
    Running {
        distance: f64,
        duration: f64,
        cadence: f64,
    },
    Cycling {
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    },
}

impl WorkoutDraft {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDraft::Running { .. } => WorkoutKind::Running,
            WorkoutDraft::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Construct the workout this draft describes.
    pub fn into_workout(self, id: WorkoutId, date: DateTime<Utc>, at: Coordinates) -> Workout {
        match self {
            WorkoutDraft::Running {
                distance,
                duration,
                cadence,
            } => Workout::running(id, date, at, distance, duration, cadence),
            WorkoutDraft::Cycling {
                distance,
                duration,
                elevation_gain,
            } => Workout::cycling(id, date, at, distance, duration, elevation_gain),
        }
    }
}

impl WorkoutForm {
    /// Coerce and check the fields relevant to the selected kind.
    ///
    /// Distance, duration and cadence must be finite and strictly positive.
    /// Elevation gain only has to be finite.
    pub fn validate(&self) -> Result<WorkoutDraft, FormError> {
        let kind: WorkoutKind = self.kind.parse()?;
        let distance = coerce_number(&self.distance);
        let duration = coerce_number(&self.duration);

        match kind {
            WorkoutKind::Running => {
                let cadence = coerce_number(&self.cadence);
                if !all_finite(&[distance, duration, cadence])
                    || !all_positive(&[distance, duration, cadence])
                {
                    return Err(FormError::Invalid);
                }
                Ok(WorkoutDraft::Running {
                    distance,
                    duration,
                    cadence,
                })
            }
            WorkoutKind::Cycling => {
                let elevation_gain = coerce_number(&self.elevation);
                if !all_finite(&[distance, duration, elevation_gain])
                    || !all_positive(&[distance, duration])
                {
                    return Err(FormError::Invalid);
                }
                Ok(WorkoutDraft::Cycling {
                    distance,
                    duration,
                    elevation_gain,
                })
            }
        }
    }

    /// Blank the numeric fields, keeping the selected type.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }
}

/// Numeric coercion of a text field, following JavaScript's `Number(text)`:
/// blank is zero, `0x`/`0o`/`0b` prefixes select a radix, garbage is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    match radix {
        Some(radix) => parse_radix(&trimmed[2..], radix),
        None => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// Unsigned integer digits in `radix`; no sign and no separators.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}

pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

pub fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}

/// The kind-specific input row currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ExtraField {
    Cadence,
    Elevation,
}

impl From<WorkoutKind> for ExtraField {
    fn from(kind: WorkoutKind) -> Self {
        match kind {
            WorkoutKind::Running => ExtraField::Cadence,
            WorkoutKind::Cycling => ExtraField::Elevation,
        }
    }
}

/// Visible state of the entry form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormState {
    pub visible: bool,
    pub kind: WorkoutKind,
    pub extra_field: ExtraField,
    /// Last submitted values; kept on rejection, blanked on success.
    pub fields: WorkoutForm,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            visible: false,
            kind: WorkoutKind::default(),
            extra_field: WorkoutKind::default().into(),
            fields: WorkoutForm::default(),
        }
    }
}

impl FormState {
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the form and blank its inputs.
    pub fn hide(&mut self) {
        self.visible = false;
        self.fields.clear();
    }

    pub fn select(&mut self, kind: WorkoutKind) {
        self.kind = kind;
        self.extra_field = kind.into();
        self.fields.kind = kind.as_str().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(kind: &str, distance: &str, duration: &str, extra: &str) -> WorkoutForm {
        WorkoutForm {
            kind: kind.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: extra.to_string(),
            elevation: extra.to_string(),
        }
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert_eq!(coerce_number(" 5.5 "), 5.5);
        assert!(coerce_number("five").is_nan());
        assert!(coerce_number("Infinity").is_infinite());
    }

    #[test]
    fn test_coerce_radix_prefixes() {
        assert_eq!(coerce_number("0x10"), 16.0);
        assert_eq!(coerce_number("0XfF"), 255.0);
        assert_eq!(coerce_number("0o7"), 7.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert!(coerce_number("0x").is_nan());
        assert!(coerce_number("0x+1").is_nan());
        assert!(coerce_number("0b2").is_nan());
        assert!(coerce_number("-0x10").is_nan());
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let err = form("running", "5", "", "170").validate().unwrap_err();
        assert_eq!(err, FormError::Invalid);
    }

    #[test]
    fn test_cycling_ignores_cadence_field() {
        let mut f = form("cycling", "20", "60", "150");
        f.cadence = "nonsense".to_string();

        let draft = f.validate().unwrap();
        assert_eq!(
            draft,
            WorkoutDraft::Cycling {
                distance: 20.0,
                duration: 60.0,
                elevation_gain: 150.0
            }
        );
    }

    #[test]
    fn test_numbers_deserialize_as_text() {
        let f: WorkoutForm =
            serde_json::from_str(r#"{"type":"running","distance":5,"duration":"25","cadence":null}"#)
                .unwrap();

        assert_eq!(f.distance, "5");
        assert_eq!(f.duration, "25");
        assert_eq!(f.cadence, "");
        assert_eq!(f.elevation, "");
    }

    #[test]
    fn test_missing_type_defaults_to_running() {
        let f: WorkoutForm = serde_json::from_str(r#"{"distance":"1"}"#).unwrap();
        assert_eq!(f.kind, "running");
    }

    #[test]
    fn test_select_switches_extra_field() {
        let mut state = FormState::default();
        assert_eq!(state.extra_field, ExtraField::Cadence);

        state.select(WorkoutKind::Cycling);
        assert_eq!(state.extra_field, ExtraField::Elevation);
        assert_eq!(state.fields.kind, "cycling");
    }

    #[test]
    fn test_hide_clears_inputs_but_keeps_kind() {
        let mut state = FormState::default();
        state.show();
        state.select(WorkoutKind::Cycling);
        state.fields = form("cycling", "1", "2", "3");

        state.hide();
        assert!(!state.visible);
        assert_eq!(state.fields.kind, "cycling");
        assert!(state.fields.distance.is_empty());
        assert!(state.fields.elevation.is_empty());
    }
}
