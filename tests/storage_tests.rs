// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout persistence: round trips, restarts and reset.

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use workout_mapper::db::{keys, FileStore, KeyValueStore, MemoryStore, WorkoutStorage};
use workout_mapper::models::{Coordinates, Workout, WorkoutId, WorkoutKind};
use workout_mapper::services::{App, AppSettings, MarkerLayer};

mod common;
use common::{form, ready_app};

fn sample() -> Vec<Workout> {
    let date = Utc.with_ymd_and_hms(2025, 8, 14, 17, 45, 0).unwrap();
    vec![
        Workout::running(
            WorkoutId(1_000_000_001),
            date,
            Coordinates::new(47.37, 8.54),
            7.5,
            41.0,
            168.0,
        ),
        Workout::cycling(
            WorkoutId(1_000_000_002),
            date,
            Coordinates::new(46.2, 6.14),
            55.0,
            130.0,
            -420.0,
        ),
    ]
}

#[test]
fn test_save_then_load_preserves_fields() {
    let storage = WorkoutStorage::new(Arc::new(MemoryStore::new()));
    let original = sample();

    storage.save(&original).unwrap();
    let loaded = storage.load();

    assert_eq!(loaded.len(), original.len());
    for (before, after) in original.iter().zip(&loaded) {
        assert_eq!(after.id(), before.id());
        assert_eq!(after.kind(), before.kind());
        assert_eq!(after.coords(), before.coords());
        assert_eq!(after.distance(), before.distance());
        assert_eq!(after.duration(), before.duration());
        assert_eq!(after.cadence(), before.cadence());
        assert_eq!(after.elevation_gain(), before.elevation_gain());
        assert_eq!(after.pace(), before.pace());
        assert_eq!(after.speed(), before.speed());
        assert_eq!(after.description(), before.description());
    }
}

#[test]
fn test_save_overwrites_previous_list() {
    let storage = WorkoutStorage::new(Arc::new(MemoryStore::new()));
    let workouts = sample();

    storage.save(&workouts).unwrap();
    storage.save(&workouts[..1]).unwrap();

    assert_eq!(storage.load().len(), 1);
}

#[test]
fn test_missing_and_corrupt_slots_load_empty() {
    let store = Arc::new(MemoryStore::new());
    let storage = WorkoutStorage::new(store.clone());
    assert!(storage.load().is_empty());

    store.set(keys::WORKOUTS, "{\"definitely\": \"not a list\"").unwrap();
    assert!(storage.load().is_empty());
}

#[test]
fn test_clear_leaves_nothing_to_load() {
    let store = Arc::new(MemoryStore::new());
    let storage = WorkoutStorage::new(store.clone());
    storage.save(&sample()).unwrap();

    storage.clear().unwrap();

    assert_eq!(store.get(keys::WORKOUTS).unwrap(), None);
    assert!(storage.load().is_empty());
}

#[test]
fn test_workouts_survive_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workouts.json");

    {
        let mut app = ready_app(Arc::new(FileStore::new(&path)));
        app.click_map(Coordinates::new(1.0, 2.0)).unwrap();
        app.submit(form("running", "5", "25", "5")).unwrap();
        app.click_map(Coordinates::new(3.0, 4.0)).unwrap();
        app.submit(form("cycling", "20", "60", "150")).unwrap();
    }

    let restarted = App::new(
        MarkerLayer::new(),
        WorkoutStorage::new(Arc::new(FileStore::new(&path))),
        AppSettings::default(),
    );

    let kinds: Vec<WorkoutKind> = restarted.workouts().iter().map(|w| w.kind()).collect();
    assert_eq!(kinds, vec![WorkoutKind::Running, WorkoutKind::Cycling]);
    assert_eq!(restarted.workouts()[1].speed(), Some(20.0));
    assert_eq!(restarted.workouts()[0].coords(), Coordinates::new(1.0, 2.0));
}

#[test]
fn test_browser_blob_keeps_its_description() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            keys::WORKOUTS,
            r#"[{"id":"4606200000","date":"2024-05-01T23:30:00.000Z","coords":[47.1,8.2],
                "distance":5,"duration":25,"type":"running","description":"Running on May 2",
                "click":0,"cadence":170,"pace":0.147}]"#,
        )
        .unwrap();

    let loaded = WorkoutStorage::new(store).load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id(), WorkoutId(4_606_200_000));
    assert_eq!(loaded[0].description(), "Running on May 2");
}
