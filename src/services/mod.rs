// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod app;
pub mod geolocation;
pub mod map;
pub mod render;

pub use app::{App, AppSettings, Phase};
pub use geolocation::{DeviceGeolocator, GeolocationError, Geolocator, StaticGeolocator};
pub use map::{MapSurface, MapView, Marker, MarkerLayer};
pub use render::{WorkoutEntry, WorkoutList};
