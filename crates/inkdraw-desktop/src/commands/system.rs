//! System Commands
//!
//! Application exit, platform details, and context menu placement.

use inkdraw_core::{ClientRect, DEFAULT_PANEL_SIZE, Point, Size, place_panel};
use serde::Serialize;
use tauri::{AppHandle, State};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PlatformInfo {
    pub platform: &'static str,
    pub version: String,
}

/// Tear down shortcuts, tray, and window, then exit.
#[tauri::command]
pub fn quit_app(app: AppHandle, state: State<'_, AppState>) {
    let report = state.with_shell(|shell| shell.quit());
    tracing::debug!(?report, "quit requested from canvas");
    app.exit(0);
}

#[tauri::command]
pub fn get_platform_info(app: AppHandle) -> PlatformInfo {
    PlatformInfo {
        platform: std::env::consts::OS,
        version: app.package_info().version.to_string(),
    }
}

/// Position for a context panel opened at `pointer`, local to `container`.
#[tauri::command]
pub fn place_context_menu(pointer: Point, container: ClientRect, panel: Option<Size>) -> Point {
    place_panel(pointer, container, panel.unwrap_or(DEFAULT_PANEL_SIZE))
}
