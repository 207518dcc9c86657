// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout construction: derived metrics and descriptions.

use chrono::{TimeZone, Utc};
use workout_mapper::models::{Coordinates, Workout, WorkoutId, WorkoutKind};

const AT: Coordinates = Coordinates {
    lat: 40.0,
    lng: -12.0,
};

#[test]
fn test_running_pace_is_duration_over_cadence() {
    let date = Utc::now();
    let cases = [(5.0, 25.0, 5.0), (10.0, 55.5, 172.0), (0.4, 3.0, 0.25)];

    for (distance, duration, cadence) in cases {
        let w = Workout::running(WorkoutId(1), date, AT, distance, duration, cadence);

        assert_eq!(w.pace(), Some(duration / cadence));
        assert_eq!(w.speed(), None, "running workouts have no speed");
        assert_eq!(w.cadence(), Some(cadence));
        assert_eq!(w.elevation_gain(), None);
        assert_eq!(w.distance(), distance);
        assert_eq!(w.duration(), duration);
    }
}

#[test]
fn test_cycling_speed_is_km_per_hour() {
    let date = Utc::now();
    let cases = [
        (20.0, 60.0, 150.0),
        (42.2, 95.0, -300.0),
        (3.0, 7.5, 0.0),
    ];

    for (distance, duration, elevation) in cases {
        let w = Workout::cycling(WorkoutId(2), date, AT, distance, duration, elevation);

        assert_eq!(w.speed(), Some(distance / (duration / 60.0)));
        assert_eq!(w.pace(), None, "cycling workouts have no pace");
        assert_eq!(w.elevation_gain(), Some(elevation));
    }
}

#[test]
fn test_description_uses_kind_and_creation_day() {
    let jan = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let dec = Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();

    let run = Workout::running(WorkoutId(1), jan, AT, 1.0, 1.0, 1.0);
    let ride = Workout::cycling(WorkoutId(2), dec, AT, 1.0, 1.0, 1.0);

    assert_eq!(run.description(), "Running on January 1");
    assert_eq!(ride.description(), "Cycling on December 31");
}

#[test]
fn test_fields_are_kept_as_given() {
    let date = Utc.with_ymd_and_hms(2025, 4, 20, 6, 15, 0).unwrap();
    let w = Workout::cycling(WorkoutId(77), date, AT, 12.0, 30.0, 80.0);

    assert_eq!(w.id(), WorkoutId(77));
    assert_eq!(w.date(), date);
    assert_eq!(w.coords(), AT);
    assert_eq!(w.kind(), WorkoutKind::Cycling);
    assert_eq!(w.clicks(), 0);
}
