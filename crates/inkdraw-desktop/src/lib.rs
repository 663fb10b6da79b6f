//! InkDraw desktop binding.
//!
//! Wires the platform-free shell in `inkdraw-core` to Tauri: backends live in
//! [`platform`], canvas-facing commands in [`commands`], and every native
//! event is forwarded to the single coordinator held in [`state::AppState`].

pub mod commands;
pub mod logging;
pub mod platform;
pub mod signals;
pub mod state;

use anyhow::{Context, anyhow};
use inkdraw_core::{
    CloseDecision, LifecycleCoordinator, ScreenCatalog, ShortcutConfigStore, ShortcutRegistry,
    StartupOutcome, TrayController, WindowManager,
};
use tauri::path::BaseDirectory;
use tauri::{App, AppHandle, Manager, RunEvent, WindowEvent};

use platform::{
    MAIN_WINDOW_LABEL, PluginInstanceLock, TauriDisplays, TauriShortcuts, TauriTray, TauriWindows,
};
use state::{AppState, Shell, dispatch};

fn shortcut_store(app: &AppHandle) -> anyhow::Result<ShortcutConfigStore> {
    match app.path().app_data_dir() {
        Ok(dir) => Ok(ShortcutConfigStore::in_dir(&dir)),
        Err(err) => {
            tracing::warn!(%err, "app data directory unavailable; using fallback");
            ShortcutConfigStore::default_path()
                .map(ShortcutConfigStore::new)
                .ok_or_else(|| anyhow!("no per-user data directory"))
        }
    }
}

fn build_shell(app: &AppHandle) -> anyhow::Result<Shell> {
    let store = shortcut_store(app).context("failed to locate shortcut config")?;
    let tray_icon = app
        .path()
        .resolve("icons/tray.png", BaseDirectory::Resource)
        .ok()
        .filter(|path| path.exists());
    tracing::debug!(config = %store.path().display(), ?tray_icon, "building shell");

    Ok(LifecycleCoordinator::new(
        ScreenCatalog::new(TauriDisplays::new(app.clone())),
        WindowManager::new(TauriWindows::new(app.clone())),
        TrayController::new(TauriTray::new(app.clone()), tray_icon),
        ShortcutRegistry::new(TauriShortcuts::new(app.clone())),
        store,
    ))
}

fn setup(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    let handle = app.handle().clone();
    let shell = build_shell(&handle)?;
    app.manage(AppState::new(shell));

    let outcome = app
        .state::<AppState>()
        .with_shell(|shell| shell.startup(&mut PluginInstanceLock));
    if outcome == StartupOutcome::AlreadyRunning {
        handle.exit(0);
        return Ok(());
    }

    signals::spawn_listener(handle.clone());
    signals::install_panic_hook(handle);
    Ok(())
}

fn on_window_event(window: &tauri::Window, event: &WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }
    let app = window.app_handle();
    match event {
        WindowEvent::CloseRequested { api, .. } => {
            let Some(state) = app.try_state::<AppState>() else {
                return;
            };
            match state.try_with_shell(|shell| shell.close_requested()) {
                Some(CloseDecision::Prevent) => api.prevent_close(),
                Some(CloseDecision::Proceed) => {}
                None => {
                    api.prevent_close();
                    dispatch(app, |_, shell| {
                        shell.close_requested();
                    });
                }
            }
        }
        WindowEvent::Focused(focused) => {
            let focused = *focused;
            dispatch(app, move |_, shell| shell.focus_changed(focused));
        }
        WindowEvent::Destroyed => {
            dispatch(app, |_, shell| shell.window_closed());
        }
        _ => {}
    }
}

fn on_run_event(app: &AppHandle, event: RunEvent) {
    match event {
        // Closing the last window must not end the process unless quitting
        RunEvent::ExitRequested { api, code, .. } => {
            let quitting = app
                .try_state::<AppState>()
                .and_then(|state| state.try_with_shell(|shell| shell.exit_requested()))
                .unwrap_or(false);
            if code.is_none() && !quitting {
                api.prevent_exit();
            }
        }
        RunEvent::Exit => {
            if let Some(state) = app.try_state::<AppState>() {
                state.try_with_shell(|shell| shell.quit());
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            dispatch(app, |_, shell| {
                shell.reactivate();
            });
        }
        _ => {}
    }
}

pub fn run() -> tauri::Result<()> {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, args, _cwd| {
            tracing::info!(?args, "second launch; focusing running instance");
            dispatch(app, |_, shell| {
                shell.second_instance();
            });
        }))
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .setup(setup)
        .on_window_event(on_window_event)
        .invoke_handler(tauri::generate_handler![
            commands::list_screens,
            commands::switch_screen,
            commands::minimize_window,
            commands::set_always_on_top,
            commands::get_window_info,
            commands::hide_to_tray,
            commands::show_from_tray,
            commands::get_shortcuts_config,
            commands::update_shortcuts_config,
            commands::quit_app,
            commands::place_context_menu,
            commands::get_platform_info,
        ])
        .build(tauri::generate_context!())?
        .run(on_run_event);
    Ok(())
}
