//! System Tray Module
//!
//! Owns the tray icon and its context menu. The menu is static once built, so
//! label changes (new shortcut bindings) go through [`TrayController::rebuild`].
//!
//! ```text
//! tray/
//! ├── icon.rs  - Icon loading & embedded placeholder
//! ├── menu.rs  - Menu projection of the shortcut config
//! └── mod.rs   - Controller (this file)
//! ```

pub mod icon;
pub mod menu;

use std::path::PathBuf;

pub use icon::TrayIcon;
pub use menu::{TrayMenu, TrayMenuAction, TrayMenuEntry};

use crate::error::ShellResult;
use crate::shortcuts::ShortcutsConfig;

pub const TRAY_ID: &str = "inkdraw-tray";
pub const TRAY_TOOLTIP: &str = "InkDraw";

pub trait TrayHost {
    fn install(&mut self, icon: &TrayIcon, menu: &TrayMenu) -> ShellResult<()>;
    fn remove(&mut self) -> ShellResult<()>;
}

pub struct TrayController<H> {
    host: H,
    icon_path: Option<PathBuf>,
    installed: bool,
}

impl<H: TrayHost> TrayController<H> {
    pub fn new(host: H, icon_path: Option<PathBuf>) -> Self {
        Self {
            host,
            icon_path,
            installed: false,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Build the icon and menu. A tray that cannot be created is logged and
    /// the shell keeps running without it.
    pub fn create(&mut self, config: &ShortcutsConfig) -> bool {
        if self.installed {
            return true;
        }
        let icon = TrayIcon::load_or_placeholder(self.icon_path.as_deref());
        let menu = TrayMenu::from_config(config);
        match self.host.install(&icon, &menu) {
            Ok(()) => {
                self.installed = true;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "system tray unavailable");
                false
            }
        }
    }

    pub fn rebuild(&mut self, config: &ShortcutsConfig) -> bool {
        self.destroy();
        self.create(config)
    }

    /// Returns false when there was no tray to destroy.
    pub fn destroy(&mut self) -> bool {
        if !self.installed {
            return false;
        }
        if let Err(err) = self.host.remove() {
            tracing::warn!(%err, "failed to remove tray icon");
        }
        self.installed = false;
        true
    }

    /// Double-click toggles visibility.
    pub fn double_click_action(window_visible: bool) -> TrayMenuAction {
        if window_visible {
            TrayMenuAction::Hide
        } else {
            TrayMenuAction::Show
        }
    }
}
