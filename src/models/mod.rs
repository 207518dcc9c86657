// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod form;
pub mod workout;

pub use form::{ExtraField, FormError, FormState, WorkoutDraft, WorkoutForm};
pub use workout::{
    Coordinates, IdGenerator, StoredWorkout, Workout, WorkoutId, WorkoutKind, WorkoutMetrics,
};
