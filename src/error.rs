//! Crate-wide error type

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the location screen and its providers
#[derive(Debug, Error)]
pub enum Error {
    /// The user declined the foreground location permission
    #[error("Permission to access location was denied")]
    PermissionDenied,

    /// The device position read failed or the plugin is unavailable
    #[error("failed to read device position: {0}")]
    PositionFetch(String),

    /// The geocoding request failed (network, HTTP status, or decoding)
    #[error("geocoding request failed: {0}")]
    Geocode(String),

    /// Delivering a command to the map widget failed
    #[error("map command failed: {0}")]
    Map(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Geocode(err.to_string())
    }
}

impl From<tauri::Error> for Error {
    fn from(err: tauri::Error) -> Self {
        Error::Map(err.to_string())
    }
}
