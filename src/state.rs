//! Application state management

use tokio::sync::Mutex;

use crate::screen::ScreenController;

/// Application state shared across Tauri commands
pub struct AppState {
    /// The single screen's controller, serialized behind a lock because
    /// commands and the init task mutate it
    pub screen: Mutex<ScreenController>,
}

impl AppState {
    pub fn new(screen: ScreenController) -> Self {
        Self {
            screen: Mutex::new(screen),
        }
    }
}
