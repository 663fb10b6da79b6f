//! Tray menu projection.
//!
//! The menu is derived from the shortcut config every time the tray is built;
//! it is never stored on its own.

use crate::shortcuts::{ShortcutAction, ShortcutsConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    Show,
    Hide,
    ResetShortcuts,
    Quit,
}

impl TrayMenuAction {
    pub const ALL: [TrayMenuAction; 4] = [
        TrayMenuAction::Show,
        TrayMenuAction::Hide,
        TrayMenuAction::ResetShortcuts,
        TrayMenuAction::Quit,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TrayMenuAction::Show => "show",
            TrayMenuAction::Hide => "hide",
            TrayMenuAction::ResetShortcuts => "reset-shortcuts",
            TrayMenuAction::Quit => "quit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrayMenuAction::Show => "Show InkDraw",
            TrayMenuAction::Hide => "Hide to Tray",
            TrayMenuAction::ResetShortcuts => "Reset Shortcuts",
            TrayMenuAction::Quit => "Quit InkDraw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayMenuEntry {
    /// Disabled line showing a current binding.
    Binding { id: String, label: String },
    Separator,
    Action(TrayMenuAction),
}

impl TrayMenuEntry {
    pub fn label(&self) -> Option<&str> {
        match self {
            TrayMenuEntry::Binding { label, .. } => Some(label),
            TrayMenuEntry::Separator => None,
            TrayMenuEntry::Action(action) => Some(action.label()),
        }
    }

    pub fn enabled(&self) -> bool {
        matches!(self, TrayMenuEntry::Action(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayMenu {
    pub entries: Vec<TrayMenuEntry>,
}

impl TrayMenu {
    pub fn from_config(config: &ShortcutsConfig) -> Self {
        let mut entries: Vec<TrayMenuEntry> = config
            .bindings()
            .map(|(action, accelerator)| binding_entry(action, accelerator))
            .collect();
        entries.push(TrayMenuEntry::Separator);
        entries.push(TrayMenuEntry::Action(TrayMenuAction::Show));
        entries.push(TrayMenuEntry::Action(TrayMenuAction::Hide));
        entries.push(TrayMenuEntry::Separator);
        entries.push(TrayMenuEntry::Action(TrayMenuAction::ResetShortcuts));
        entries.push(TrayMenuEntry::Separator);
        entries.push(TrayMenuEntry::Action(TrayMenuAction::Quit));
        Self { entries }
    }

    /// `(label, enabled)` pairs, separators skipped.
    pub fn labels(&self) -> Vec<(String, bool)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.label().map(|label| (label.to_string(), entry.enabled())))
            .collect()
    }
}

fn binding_entry(action: ShortcutAction, accelerator: &str) -> TrayMenuEntry {
    TrayMenuEntry::Binding {
        id: format!("binding-{}", action.config_key()),
        label: format!("{}: {}", action.display_name(), accelerator),
    }
}
