//! Persisted shortcut bindings.
//!
//! The file is the single source of truth across restarts. Reads never fail
//! (defaults fill any gap) and writes go through a temp file so a failed save
//! leaves the previous file intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Accelerator, ShortcutAction};
use crate::error::ShellResult;

pub const DEFAULT_HIDE_TO_TRAY: &str = "Mod+Shift+H";
pub const DEFAULT_SHOW_FROM_TRAY: &str = "Mod+Shift+S";

const APP_DIR: &str = "inkdraw";
const CONFIG_FILE: &str = "shortcuts.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutsConfig {
    pub hide_to_tray: String,
    pub show_from_tray: String,
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        Self {
            hide_to_tray: DEFAULT_HIDE_TO_TRAY.to_string(),
            show_from_tray: DEFAULT_SHOW_FROM_TRAY.to_string(),
        }
    }
}

impl ShortcutsConfig {
    pub fn accelerator(&self, action: ShortcutAction) -> &str {
        match action {
            ShortcutAction::HideToTray => &self.hide_to_tray,
            ShortcutAction::ShowFromTray => &self.show_from_tray,
        }
    }

    fn slot_mut(&mut self, action: ShortcutAction) -> &mut String {
        match action {
            ShortcutAction::HideToTray => &mut self.hide_to_tray,
            ShortcutAction::ShowFromTray => &mut self.show_from_tray,
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = (ShortcutAction, &str)> {
        ShortcutAction::ALL
            .into_iter()
            .map(move |action| (action, self.accelerator(action)))
    }

    /// Build a complete config from loosely-typed JSON, defaulting any key
    /// that is missing, blank, not a string, or not a valid accelerator.
    pub fn from_value(value: &Value) -> Self {
        Self::default().merged(value)
    }

    /// Merge a partial update by key. A key keeps its current value when the
    /// new one is absent, blank, not a string, or does not parse as an
    /// [`Accelerator`].
    pub fn merged(&self, partial: &Value) -> Self {
        let mut merged = self.clone();
        for action in ShortcutAction::ALL {
            let candidate = partial
                .get(action.config_key())
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty());
            let Some(accelerator) = candidate else {
                continue;
            };
            if let Err(err) = accelerator.parse::<Accelerator>() {
                tracing::warn!(?action, %err, "ignoring invalid accelerator");
                continue;
            }
            *merged.slot_mut(action) = accelerator.to_string();
        }
        merged
    }
}

/// File-backed store for [`ShortcutsConfig`].
#[derive(Debug, Clone)]
pub struct ShortcutConfigStore {
    path: PathBuf,
}

impl ShortcutConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted in an application data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CONFIG_FILE))
    }

    /// Per-user default location, e.g. `~/.local/share/inkdraw/shortcuts.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Always returns a complete config. A missing file is created with the
    /// defaults.
    pub fn load(&self) -> ShortcutsConfig {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<Value>(&contents) {
                Ok(value) => ShortcutsConfig::from_value(&value),
                Err(err) => {
                    tracing::warn!(?err, path = ?self.path, "failed to parse shortcuts config; using defaults");
                    ShortcutsConfig::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let defaults = ShortcutsConfig::default();
                self.save(&defaults);
                defaults
            }
            Err(err) => {
                tracing::warn!(?err, path = ?self.path, "failed to read shortcuts config; using defaults");
                ShortcutsConfig::default()
            }
        }
    }

    /// Returns false on failure; the file on disk is left as it was.
    pub fn save(&self, config: &ShortcutsConfig) -> bool {
        match self.write_atomically(config) {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "shortcuts config saved");
                true
            }
            Err(err) => {
                tracing::warn!(%err, path = ?self.path, "failed to save shortcuts config");
                false
            }
        }
    }

    /// Load-merge-save. Returns the merged config only if it was persisted.
    pub fn update(&self, partial: &Value) -> Option<ShortcutsConfig> {
        let merged = self.load().merged(partial);
        self.save(&merged).then_some(merged)
    }

    fn write_atomically(&self, config: &ShortcutsConfig) -> ShellResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        if let Err(err) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}
