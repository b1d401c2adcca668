//! Map widget bridge
//!
//! The map itself lives in the webview (Leaflet). The controller drives it
//! through the narrow [`MapHandle`] seam; the production implementation
//! emits a `map-recenter` event that the frontend animates.

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, Runtime};

use crate::error::Result;
use crate::models::Region;

/// Event name the webview map listens on for animated recenter commands
pub const MAP_RECENTER_EVENT: &str = "map-recenter";

/// Payload of a [`MAP_RECENTER_EVENT`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecenterCommand {
    pub region: Region,
    pub duration_ms: u64,
}

/// Imperative map command seam
pub trait MapHandle: Send + Sync {
    /// Animate the viewport to `region` over `duration_ms` milliseconds
    fn animate_to(&self, region: Region, duration_ms: u64) -> Result<()>;
}

/// Production [`MapHandle`] that forwards commands to the webview map
pub struct WebviewMap<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> WebviewMap<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> MapHandle for WebviewMap<R> {
    fn animate_to(&self, region: Region, duration_ms: u64) -> Result<()> {
        self.app.emit(
            MAP_RECENTER_EVENT,
            RecenterCommand {
                region,
                duration_ms,
            },
        )?;
        Ok(())
    }
}
