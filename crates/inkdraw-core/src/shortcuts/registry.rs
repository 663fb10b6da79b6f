//! Binding configured accelerators to shortcut actions.

use super::{Accelerator, ShortcutAction, ShortcutConfigStore, ShortcutsConfig};
use crate::error::ShellResult;

/// Platform facility that owns global accelerators.
pub trait ShortcutHost {
    /// `accelerator` is already normalized to the platform form.
    fn register(&mut self, accelerator: &str, action: ShortcutAction) -> ShellResult<()>;
    fn unregister_all(&mut self) -> ShellResult<()>;
}

/// Outcome of applying a config. Failures are per binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub registered: Vec<ShortcutAction>,
    pub failed: Vec<(ShortcutAction, String)>,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ShortcutRegistry<H> {
    host: H,
    bound: Vec<(ShortcutAction, String)>,
    active: bool,
}

impl<H: ShortcutHost> ShortcutRegistry<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            bound: Vec::new(),
            active: false,
        }
    }

    /// Accelerators currently bound, in platform form.
    pub fn bound(&self) -> &[(ShortcutAction, String)] {
        &self.bound
    }

    /// Drop every binding, then register each configured accelerator on its
    /// own so one bad binding never blocks the other.
    pub fn apply(&mut self, config: &ShortcutsConfig) -> ApplyReport {
        if let Err(err) = self.host.unregister_all() {
            tracing::warn!(%err, "failed to clear global shortcuts before re-registering");
        }
        self.bound.clear();
        self.active = true;

        let mut report = ApplyReport::default();
        for (action, raw) in config.bindings() {
            match self.bind(action, raw) {
                Ok(accelerator) => {
                    tracing::info!(?action, %accelerator, "global shortcut registered");
                    self.bound.push((action, accelerator));
                    report.registered.push(action);
                }
                Err(err) => {
                    tracing::warn!(?action, accelerator = raw, %err, "global shortcut not registered");
                    report.failed.push((action, err.to_string()));
                }
            }
        }
        report
    }

    fn bind(&mut self, action: ShortcutAction, raw: &str) -> ShellResult<String> {
        let accelerator = raw.parse::<Accelerator>()?.to_platform_string();
        self.host.register(&accelerator, action)?;
        Ok(accelerator)
    }

    /// Persist the built-in defaults and apply them.
    pub fn reset_to_defaults(&mut self, store: &ShortcutConfigStore) -> (ShortcutsConfig, ApplyReport) {
        let defaults = ShortcutsConfig::default();
        if !store.save(&defaults) {
            tracing::warn!("default shortcuts applied but not persisted");
        }
        let report = self.apply(&defaults);
        (defaults, report)
    }

    /// Release every binding. Returns false when nothing was registered,
    /// so repeated shutdown triggers never touch the host twice.
    pub fn unregister_all(&mut self) -> bool {
        if !self.active {
            return false;
        }
        if let Err(err) = self.host.unregister_all() {
            tracing::warn!(%err, "failed to unregister global shortcuts");
        }
        self.bound.clear();
        self.active = false;
        true
    }
}
