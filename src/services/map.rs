// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map surface collaborator and the in-memory marker layer served to clients.

use crate::models::{Coordinates, WorkoutId, WorkoutKind};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use serde::Serialize;

/// Animated pan settings for a view change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

/// Where the map is looking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    /// `None` means jump without animation.
    pub pan: Option<PanOptions>,
}

/// Popup attached to a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
    pub content: String,
}

/// A workout pinned to the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub workout_id: WorkoutId,
    pub kind: WorkoutKind,
    pub coords: Coordinates,
    pub popup: PopupOptions,
}

/// Operations the controller needs from a map.
pub trait MapSurface: Send {
    /// Center the map. The first call initializes it.
    fn set_view(&mut self, view: MapView);

    /// Add a marker with an open popup. No de-duplication.
    fn place_marker(&mut self, marker: Marker);

    /// Drop all markers and the view.
    fn clear(&mut self);
}

/// Map state kept on the server and drawn by the client.
#[derive(Debug, Default, Clone)]
pub struct MarkerLayer {
    view: Option<MapView>,
    markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<MapView> {
        self.view
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers as a GeoJSON FeatureCollection of points with popup properties.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self.markers.iter().map(marker_feature).collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

impl MapSurface for MarkerLayer {
    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
    }

    fn place_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn clear(&mut self) {
        self.view = None;
        self.markers.clear();
    }
}

fn marker_feature(marker: &Marker) -> Feature {
    let point: geo::Point<f64> = marker.coords.into();

    let mut properties = JsonObject::new();
    properties.insert("kind".into(), marker.kind.as_str().into());
    properties.insert("content".into(), marker.popup.content.clone().into());
    properties.insert("className".into(), marker.popup.class_name.clone().into());
    properties.insert("maxWidth".into(), marker.popup.max_width.into());
    properties.insert("minWidth".into(), marker.popup.min_width.into());
    properties.insert("autoClose".into(), marker.popup.auto_close.into());
    properties.insert("closeOnClick".into(), marker.popup.close_on_click.into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&point))),
        id: Some(Id::Number(marker.workout_id.0.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}
