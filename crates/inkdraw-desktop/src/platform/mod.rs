//! Tauri Backends
//!
//! Implements the shell's platform traits on top of Tauri.
//!
//! ## Architecture
//!
//! ```text
//! platform/
//! ├── displays.rs  - Monitor enumeration
//! ├── window.rs    - Overlay webview window
//! ├── tray.rs      - Tray icon and native menu
//! ├── shortcuts.rs - Global shortcut plugin
//! └── mod.rs       - Public API (this file)
//! ```

pub mod displays;
pub mod shortcuts;
pub mod tray;
pub mod window;

use inkdraw_core::ShellPlatform;

pub use displays::TauriDisplays;
pub use shortcuts::TauriShortcuts;
pub use tray::TauriTray;
pub use window::{MAIN_WINDOW_LABEL, TauriWindow, TauriWindows};

pub struct TauriPlatform;

impl ShellPlatform for TauriPlatform {
    type Displays = TauriDisplays;
    type Windows = TauriWindows;
    type Tray = TauriTray;
    type Shortcuts = TauriShortcuts;
}

/// Always granted: the single-instance plugin already terminated any
/// duplicate process before setup runs.
pub struct PluginInstanceLock;

impl inkdraw_core::InstanceLock for PluginInstanceLock {
    fn acquire(&mut self) -> bool {
        true
    }
}
