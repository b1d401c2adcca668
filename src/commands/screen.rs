//! Location screen commands

use tauri::State;

use crate::screen::ScreenSnapshot;
use crate::state::AppState;

/// Current renderable state of the screen
#[tauri::command]
pub async fn screen_snapshot(state: State<'_, AppState>) -> Result<ScreenSnapshot, String> {
    let screen = state.screen.lock().await;
    Ok(screen.snapshot())
}

/// Submit a place search with the raw query string
#[tauri::command]
pub async fn search_location(
    query: String,
    state: State<'_, AppState>,
) -> Result<ScreenSnapshot, String> {
    let mut screen = state.screen.lock().await;
    screen
        .submit_search(&query)
        .await
        .map_err(|e| e.to_string())?;
    Ok(screen.snapshot())
}

/// Recenter the map on the device position, dropping any search result
#[tauri::command]
pub async fn go_to_my_location(state: State<'_, AppState>) -> Result<ScreenSnapshot, String> {
    let mut screen = state.screen.lock().await;
    screen.go_to_my_location().map_err(|e| e.to_string())?;
    Ok(screen.snapshot())
}
