//! Geographic value types shared between the screen controller and the webview

use serde::{Deserialize, Serialize};

/// Latitude/longitude span of the viewport used for every animated recenter
pub const RECENTER_SPAN: Span = Span {
    latitude_delta: 0.09,
    longitude_delta: 0.05,
};

/// Slightly narrower span used for the initial map region on first render
pub const INITIAL_SPAN: Span = Span {
    latitude_delta: 0.09,
    longitude_delta: 0.04,
};

/// Duration of every animated recenter, in milliseconds
pub const RECENTER_DURATION_MS: u64 = 1000;

/// A point on the globe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Latitude/longitude extent of a map viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// A visible map region: center plus span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Build a region centered on `center` with the given span
    pub fn around(center: Coordinate, span: Span) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: span.latitude_delta,
            longitude_delta: span.longitude_delta,
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Pin color for a map marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Blue,
    Red,
}

/// A point annotation rendered on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
    pub description: String,
    pub color: MarkerColor,
}
