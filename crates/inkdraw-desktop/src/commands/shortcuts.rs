use inkdraw_core::{ShortcutsConfig, UpdateShortcutsResponse};
use serde_json::Value;
use tauri::State;

use crate::state::AppState;

#[tauri::command]
pub fn get_shortcuts_config(state: State<'_, AppState>) -> ShortcutsConfig {
    state.with_shell(|shell| shell.config().clone())
}

/// Merge a partial config into the current one, persist it, and rebind.
/// Missing, blank, or non-string fields keep their current value.
#[tauri::command]
pub fn update_shortcuts_config(
    state: State<'_, AppState>,
    config: Value,
) -> UpdateShortcutsResponse {
    state.with_shell(|shell| shell.update_shortcuts(&config))
}
