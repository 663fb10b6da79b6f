use inkdraw_core::{ShellError, ShellResult, ShortcutAction, ShortcutHost};
use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

use crate::state::dispatch;

/// Global shortcuts through the Tauri plugin (X11, macOS, Windows).
pub struct TauriShortcuts {
    app: AppHandle,
}

impl TauriShortcuts {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ShortcutHost for TauriShortcuts {
    fn register(&mut self, accelerator: &str, action: ShortcutAction) -> ShellResult<()> {
        self.app
            .global_shortcut()
            .on_shortcut(accelerator, move |app, _shortcut, event| {
                if event.state() == ShortcutState::Pressed {
                    dispatch(app, move |_, shell| shell.shortcut_triggered(action));
                }
            })
            .map_err(|err| ShellError::Shortcut {
                accelerator: accelerator.to_string(),
                reason: err.to_string(),
            })
    }

    fn unregister_all(&mut self) -> ShellResult<()> {
        self.app
            .global_shortcut()
            .unregister_all()
            .map_err(|err| ShellError::Shortcut {
                accelerator: "*".into(),
                reason: err.to_string(),
            })
    }
}
