//! Global shortcut configuration and registration.
//!
//! ```text
//! shortcuts/
//! ├── accelerator.rs - Accelerator parsing and platform normalization
//! ├── config.rs      - Persisted bindings, merge policy, file store
//! ├── registry.rs    - Binding accelerators to actions via a host backend
//! └── mod.rs         - Public API (this file)
//! ```

pub mod accelerator;
pub mod config;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use accelerator::Accelerator;
pub use config::{
    DEFAULT_HIDE_TO_TRAY, DEFAULT_SHOW_FROM_TRAY, ShortcutConfigStore, ShortcutsConfig,
};
pub use registry::{ApplyReport, ShortcutHost, ShortcutRegistry};

/// Actions a global shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    HideToTray,
    ShowFromTray,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 2] = [ShortcutAction::HideToTray, ShortcutAction::ShowFromTray];

    /// Key used in the persisted config and the update request.
    pub fn config_key(&self) -> &'static str {
        match self {
            ShortcutAction::HideToTray => "hideToTray",
            ShortcutAction::ShowFromTray => "showFromTray",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutAction::HideToTray => "Hide to Tray",
            ShortcutAction::ShowFromTray => "Show from Tray",
        }
    }
}
