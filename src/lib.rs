//! Bus O' Clock - Map view with device location and place search
//!
//! A Tauri application that shows the user's current GPS position on a map,
//! geocodes free-text place searches, and recenters the map on either one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tauri::{Emitter, Manager};

mod commands;
mod error;
mod models;
mod providers;
mod screen;
mod state;

pub use error::{Error, Result};
pub use models::{
    Coordinate, Marker, MarkerColor, Region, Span, INITIAL_SPAN, RECENTER_DURATION_MS,
    RECENTER_SPAN,
};
pub use providers::{
    DeviceLocation, DevicePosition, GeocodeCandidate, Geocoder, GeocoderConfig, LocationProvider,
    MapHandle, NominatimGeocoder, PermissionGrant, WebviewMap, MAP_RECENTER_EVENT,
};
pub use screen::{ScreenController, ScreenPhase, ScreenSnapshot};

use state::AppState;

/// Event emitted to the webview whenever the screen state changes outside a
/// command round-trip (currently only after initialization)
pub const SCREEN_UPDATE_EVENT: &str = "screen-update";

/// Get application info
#[tauri::command]
fn get_app_info() -> AppInfo {
    AppInfo {
        name: "Bus O' Clock".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Map view with device location and place search".to_string(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_geolocation::init())
        .setup(|app| {
            let handle = app.handle().clone();

            let geocoder = NominatimGeocoder::new(&GeocoderConfig::default())?;
            let screen = ScreenController::new(
                Arc::new(DeviceLocation::new(handle.clone())),
                Arc::new(geocoder),
                Arc::new(WebviewMap::new(handle.clone())),
            );
            app.manage(AppState::new(screen));

            // Mount-time initialization: permission request, then a one-shot
            // position read. The webview learns the outcome via an event.
            tauri::async_runtime::spawn(async move {
                let state = handle.state::<AppState>();
                let mut screen = state.screen.lock().await;
                if let Err(e) = screen.initialize().await {
                    log::error!("location initialization failed: {e}");
                }
                let snapshot = screen.snapshot();
                drop(screen);

                if let Err(e) = handle.emit(SCREEN_UPDATE_EVENT, &snapshot) {
                    log::warn!("failed to emit screen update: {e}");
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_app_info,
            // Screen commands
            commands::screen_snapshot,
            commands::search_location,
            commands::go_to_my_location,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
