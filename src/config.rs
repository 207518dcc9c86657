// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::models::Coordinates;
use std::env;
use std::path::PathBuf;

/// Zoom level used both for the initial view and when panning to a workout.
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JSON file holding the persisted workout slot
    pub store_path: PathBuf,
    /// Map zoom level
    pub map_zoom: u8,
    /// Fixed position to use instead of asking the device
    pub home_position: Option<Coordinates>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            store_path: PathBuf::from("data/workouts.json"),
            map_zoom: DEFAULT_MAP_ZOOM,
            home_position: Some(Coordinates::new(51.505, -0.09)),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `HOME_LAT` and `HOME_LNG` must be set together; without them the
    /// position is requested from the connected device.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let home_position = match (env::var("HOME_LAT").ok(), env::var("HOME_LNG").ok()) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(
                parse_var("HOME_LAT", &lat)?,
                parse_var("HOME_LNG", &lng)?,
            )),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("HOME_LNG")),
            (None, Some(_)) => return Err(ConfigError::Missing("HOME_LAT")),
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store_path: env::var("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/workouts.json")),
            map_zoom: match env::var("MAP_ZOOM") {
                Ok(raw) => parse_var("MAP_ZOOM", &raw)?,
                Err(_) => DEFAULT_MAP_ZOOM,
            },
            home_position,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
