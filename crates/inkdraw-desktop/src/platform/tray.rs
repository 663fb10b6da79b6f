use inkdraw_core::{
    Followup, ShellError, ShellResult, TRAY_ID, TRAY_TOOLTIP, TrayHost, TrayIcon, TrayMenu,
    TrayMenuAction, TrayMenuEntry,
};
use tauri::image::Image;
use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::{MouseButton, TrayIconBuilder, TrayIconEvent};
use tauri::{AppHandle, Manager};

use crate::state::dispatch;

fn tray_error(err: tauri::Error) -> ShellError {
    ShellError::Tray(err.to_string())
}

pub struct TauriTray {
    app: AppHandle,
}

impl TauriTray {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn build_menu(&self, menu: &TrayMenu) -> tauri::Result<Menu<tauri::Wry>> {
        let native = Menu::new(&self.app)?;
        for entry in &menu.entries {
            match entry {
                TrayMenuEntry::Binding { id, label } => {
                    let item =
                        MenuItem::with_id(&self.app, id.as_str(), label, false, None::<&str>)?;
                    native.append(&item)?;
                }
                TrayMenuEntry::Separator => {
                    native.append(&PredefinedMenuItem::separator(&self.app)?)?;
                }
                TrayMenuEntry::Action(action) => {
                    let item = MenuItem::with_id(
                        &self.app,
                        action.id(),
                        action.label(),
                        true,
                        None::<&str>,
                    )?;
                    native.append(&item)?;
                }
            }
        }
        Ok(native)
    }
}

impl TrayHost for TauriTray {
    fn install(&mut self, icon: &TrayIcon, menu: &TrayMenu) -> ShellResult<()> {
        let native_menu = self.build_menu(menu).map_err(tray_error)?;
        let (rgba, width, height) = icon.clone().into_parts();

        let mut builder = TrayIconBuilder::with_id(TRAY_ID)
            .icon(Image::new_owned(rgba, width, height))
            .tooltip(TRAY_TOOLTIP)
            .menu(&native_menu)
            .show_menu_on_left_click(false)
            .on_menu_event(|app, event| {
                let Some(action) = TrayMenuAction::from_id(event.id().as_ref()) else {
                    tracing::debug!(id = ?event.id(), "ignoring tray menu item");
                    return;
                };
                dispatch(app, move |app, shell| {
                    if shell.tray_menu(action) == Followup::ExitProcess {
                        app.exit(0);
                    }
                });
            })
            .on_tray_icon_event(|tray, event| {
                if let TrayIconEvent::DoubleClick {
                    button: MouseButton::Left,
                    ..
                } = event
                {
                    dispatch(tray.app_handle(), |_, shell| shell.tray_double_click());
                }
            });

        // Linux writes the icon to disk for the status notifier host
        if let Ok(cache_dir) = self.app.path().app_cache_dir() {
            builder = builder.temp_dir_path(cache_dir);
        }

        builder.build(&self.app).map_err(tray_error)?;
        Ok(())
    }

    fn remove(&mut self) -> ShellResult<()> {
        match self.app.remove_tray_by_id(TRAY_ID) {
            Some(_) => Ok(()),
            None => Err(ShellError::Tray(format!("no tray icon with id {TRAY_ID}"))),
        }
    }
}
