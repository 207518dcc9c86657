// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout list persistence on top of a [`KeyValueStore`].

use super::{keys, KeyValueStore, StoreError};
use crate::models::{StoredWorkout, Workout};
use std::sync::Arc;

/// Reads and writes the whole workout list as one slot.
#[derive(Clone)]
pub struct WorkoutStorage {
    store: Arc<dyn KeyValueStore>,
}

impl WorkoutStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrite the slot with `workouts`.
    pub fn save(&self, workouts: &[Workout]) -> Result<(), StoreError> {
        let stored: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from).collect();
        let json = serde_json::to_string(&stored)?;
        self.store.set(keys::WORKOUTS, &json)
    }

    /// Load the persisted list.
    ///
    /// A missing, unreadable or unparsable slot is "no data yet" and yields an
    /// empty list. Individual entries that cannot be rebuilt are skipped.
    pub fn load(&self) -> Vec<Workout> {
        let raw = match self.store.get(keys::WORKOUTS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read persisted workouts");
                return Vec::new();
            }
        };

        // JSON `null` is what the browser build wrote for an empty slot.
        let stored: Vec<StoredWorkout> =
            match serde_json::from_str::<Option<Vec<StoredWorkout>>>(&raw) {
                Ok(stored) => stored.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unparsable workout slot");
                    return Vec::new();
                }
            };

        stored
            .into_iter()
            .filter_map(|s| match Workout::try_from(s) {
                Ok(w) => Some(w),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping persisted workout");
                    None
                }
            })
            .collect()
    }

    /// Remove the slot entirely.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(keys::WORKOUTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_reads_browser_era_blob() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                keys::WORKOUTS,
                r#"[{"date":"2024-05-01T08:00:00.000Z","id":4123456789,"click":0,
                    "coords":[51.5,-0.12],"distance":5,"duration":25,"type":"running",
                    "cadence":170,"pace":0.147,"description":"Running on May 1"}]"#,
            )
            .unwrap();

        let workouts = WorkoutStorage::new(store).load();

        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id().0, 4_123_456_789);
        assert_eq!(workouts[0].cadence(), Some(170.0));
        assert_eq!(workouts[0].description(), "Running on May 1");
    }

    #[test]
    fn test_null_slot_is_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::WORKOUTS, "null").unwrap();

        assert!(WorkoutStorage::new(store).load().is_empty());
    }

    #[test]
    fn test_unknown_kind_entries_are_skipped() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                keys::WORKOUTS,
                r#"[{"date":"2024-05-01T08:00:00Z","id":1,"coords":[0,0],"distance":1,
                     "duration":1,"type":"swimming"},
                    {"date":"2024-05-01T08:00:00Z","id":2,"coords":[0,0],"distance":1,
                     "duration":1,"type":"cycling","elevationGain":3}]"#,
            )
            .unwrap();

        let workouts = WorkoutStorage::new(store).load();

        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id().0, 2);
    }
}
