//! Device location bridge
//!
//! Wraps `tauri-plugin-geolocation` behind the [`LocationProvider`] seam so
//! the screen controller receives the permission grant as an explicit value
//! instead of querying OS state ad hoc, and so tests can inject a fake.

use async_trait::async_trait;
use tauri::plugin::PermissionState;
use tauri::{AppHandle, Runtime};
use tauri_plugin_geolocation::{GeolocationExt, PermissionType, PositionOptions};

use crate::error::{Error, Result};
use crate::models::Coordinate;

/// Outcome of the foreground location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionGrant {
    Granted,
    Denied,
}

/// One-shot device position with provider metadata
///
/// Accuracy and timestamp are stored but never interpreted by the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters, as reported by the device
    pub accuracy: f64,
    /// Milliseconds since the Unix epoch at the time of the fix
    pub timestamp_ms: u64,
}

impl DevicePosition {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Device location provider seam
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request the foreground location permission
    async fn request_permission(&self) -> Result<PermissionGrant>;

    /// Read the current position once
    async fn current_position(&self) -> Result<DevicePosition>;
}

/// Production [`LocationProvider`] backed by the geolocation plugin
pub struct DeviceLocation<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> DeviceLocation<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl<R: Runtime> LocationProvider for DeviceLocation<R> {
    async fn request_permission(&self) -> Result<PermissionGrant> {
        let status = self
            .app
            .geolocation()
            .request_permissions(Some(vec![PermissionType::Location]))
            .map_err(|e| Error::PositionFetch(e.to_string()))?;

        // Anything short of an explicit grant counts as denied
        Ok(match status.location {
            PermissionState::Granted => PermissionGrant::Granted,
            _ => PermissionGrant::Denied,
        })
    }

    async fn current_position(&self) -> Result<DevicePosition> {
        let position = self
            .app
            .geolocation()
            .get_current_position(Some(PositionOptions::default()))
            .map_err(|e| Error::PositionFetch(e.to_string()))?;

        Ok(DevicePosition {
            latitude: position.coords.latitude,
            longitude: position.coords.longitude,
            accuracy: position.coords.accuracy,
            timestamp_ms: position.timestamp,
        })
    }
}
