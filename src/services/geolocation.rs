// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geolocation sources.
//!
//! A position request is a single future with two outcomes. There is no
//! retry, timeout or cancellation: the request resolves when the source
//! answers.

use crate::models::Coordinates;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

type PositionResult = Result<Coordinates, GeolocationError>;

/// Why no position could be obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Permission to read the position was denied")]
    Denied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// One-shot source of the user's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> PositionResult;
}

/// Always answers with a configured position.
#[derive(Debug, Clone, Copy)]
pub struct StaticGeolocator {
    position: Coordinates,
}

impl StaticGeolocator {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for StaticGeolocator {
    async fn current_position(&self) -> PositionResult {
        Ok(self.position)
    }
}

enum Slot {
    Idle,
    Waiting(oneshot::Sender<PositionResult>),
    Reported(PositionResult),
}

/// Position reported by the connected client device.
///
/// A report that arrives before anyone asked is kept and handed to the next
/// request.
pub struct DeviceGeolocator {
    slot: Mutex<Slot>,
}

impl Default for DeviceGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceGeolocator {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Idle),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether a position request is currently waiting for a report.
    pub fn is_waiting(&self) -> bool {
        matches!(*self.slot(), Slot::Waiting(_))
    }

    /// Deliver the device's answer.
    pub fn report(&self, result: PositionResult) {
        let mut slot = self.slot();
        match std::mem::replace(&mut *slot, Slot::Idle) {
            Slot::Waiting(tx) => {
                if let Err(result) = tx.send(result) {
                    // Requester went away; keep the answer for the next one.
                    *slot = Slot::Reported(result);
                }
            }
            Slot::Idle | Slot::Reported(_) => *slot = Slot::Reported(result),
        }
    }

    /// Drop any pending request and any report not yet handed out.
    pub fn cancel(&self) {
        *self.slot() = Slot::Idle;
    }
}

#[async_trait]
impl Geolocator for DeviceGeolocator {
    async fn current_position(&self) -> PositionResult {
        let rx = {
            let mut slot = self.slot();
            match std::mem::replace(&mut *slot, Slot::Idle) {
                Slot::Reported(result) => return result,
                // A newer request supersedes an older one.
                Slot::Idle | Slot::Waiting(_) => {
                    let (tx, rx) = oneshot::channel();
                    *slot = Slot::Waiting(tx);
                    rx
                }
            }
        };

        rx.await
            .unwrap_or_else(|_| Err(GeolocationError::Unavailable("request superseded".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_static_position() {
        let geo = StaticGeolocator::new(Coordinates::new(1.0, 2.0));
        assert_eq!(geo.current_position().await, Ok(Coordinates::new(1.0, 2.0)));
    }

    #[tokio::test]
    async fn test_report_before_request_is_kept() {
        let geo = DeviceGeolocator::new();
        geo.report(Err(GeolocationError::Denied));

        assert_eq!(geo.current_position().await, Err(GeolocationError::Denied));
        assert!(!geo.is_waiting());
    }

    #[tokio::test]
    async fn test_report_resolves_waiting_request() {
        let geo = Arc::new(DeviceGeolocator::new());
        let waiter = {
            let geo = geo.clone();
            tokio::spawn(async move { geo.current_position().await })
        };

        while !geo.is_waiting() {
            tokio::task::yield_now().await;
        }
        geo.report(Ok(Coordinates::new(10.0, 20.0)));

        assert_eq!(waiter.await.unwrap(), Ok(Coordinates::new(10.0, 20.0)));
    }

    #[tokio::test]
    async fn test_cancel_releases_waiting_request() {
        let geo = Arc::new(DeviceGeolocator::new());
        let waiter = {
            let geo = geo.clone();
            tokio::spawn(async move { geo.current_position().await })
        };

        while !geo.is_waiting() {
            tokio::task::yield_now().await;
        }
        geo.cancel();

        assert!(matches!(
            waiter.await.unwrap(),
            Err(GeolocationError::Unavailable(_))
        ));
        assert!(!geo.is_waiting());
    }
}
