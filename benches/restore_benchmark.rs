use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use workout_mapper::db::{MemoryStore, WorkoutStorage};
use workout_mapper::models::{Coordinates, Workout, WorkoutId};
use workout_mapper::services::{App, AppSettings, MarkerLayer};

const WORKOUT_COUNT: u64 = 2_000;

/// A long journal alternating runs and rides around one city.
fn journal() -> Vec<Workout> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
    (0..WORKOUT_COUNT)
        .map(|i| {
            let date = start + Duration::hours(i as i64 * 13);
            let coords = Coordinates::new(47.3 + (i % 50) as f64 * 0.01, 8.5);
            if i % 2 == 0 {
                Workout::running(WorkoutId(i), date, coords, 8.0, 42.0, 172.0)
            } else {
                Workout::cycling(WorkoutId(i), date, coords, 45.0, 110.0, 380.0)
            }
        })
        .collect()
}

fn benchmark_restore(c: &mut Criterion) {
    let storage = WorkoutStorage::new(Arc::new(MemoryStore::new()));
    storage
        .save(&journal())
        .expect("Failed to seed workout store");

    let mut group = c.benchmark_group("restore");

    group.bench_function("load_typed_workouts", |b| {
        b.iter(|| black_box(storage.load()))
    });

    group.bench_function("new_session_with_markers", |b| {
        b.iter(|| {
            let mut app = App::new(MarkerLayer::new(), storage.clone(), AppSettings::default());
            app.resolve_position(Ok(Coordinates::new(47.37, 8.54)))
                .expect("Failed to open map");
            black_box(app.map().to_geojson())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_restore);
criterion_main!(benches);
