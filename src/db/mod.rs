// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer: a synchronous key-value store and the workout slot.

pub mod file;
pub mod memory;
pub mod workouts;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use workouts::WorkoutStorage;

/// Slot names as constants.
pub mod keys {
    /// The full workout list, serialized as one JSON array.
    pub const WORKOUTS: &str = "workouts";
}

/// Minimal string-keyed store with whole-value reads and writes.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot; `Ok(None)` if it was never written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a slot.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Errors from store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}
