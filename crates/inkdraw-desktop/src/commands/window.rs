//! Window Commands
//!
//! Screen enumeration, screen switching, and overlay visibility.

use inkdraw_core::{ScreenDescriptor, WindowState};
use tauri::{AppHandle, State};

use crate::state::{AppState, dispatch};

#[tauri::command]
pub fn list_screens(state: State<'_, AppState>) -> Vec<ScreenDescriptor> {
    state.with_shell(|shell| shell.list_screens())
}

#[tauri::command]
pub fn switch_screen(state: State<'_, AppState>, screen_id: u32) -> bool {
    state.with_shell(|shell| shell.switch_screen(screen_id))
}

#[tauri::command]
pub fn minimize_window(state: State<'_, AppState>) -> bool {
    state.with_shell(|shell| shell.minimize())
}

#[tauri::command]
pub fn set_always_on_top(state: State<'_, AppState>, always_on_top: bool) -> bool {
    state.with_shell(|shell| shell.set_always_on_top(always_on_top))
}

#[tauri::command]
pub fn get_window_info(state: State<'_, AppState>) -> Option<WindowState> {
    state.with_shell(|shell| shell.window_info())
}

#[tauri::command]
pub fn hide_to_tray(state: State<'_, AppState>) -> bool {
    state.with_shell(|shell| shell.hide_to_tray())
}

/// Queued rather than run in place: revealing may recreate the window, and
/// window creation deadlocks inside a synchronous command on Windows.
#[tauri::command]
pub fn show_from_tray(app: AppHandle) -> bool {
    dispatch(&app, |_, shell| {
        shell.show_from_tray();
    });
    true
}
