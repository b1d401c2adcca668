//! Tauri command handlers for Bus O' Clock

pub mod screen;

// Re-export all commands
pub use screen::*;
