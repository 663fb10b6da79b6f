//! Shell lifecycle state machine.
//!
//! One [`LifecycleCoordinator`] owns the window, tray, shortcut bindings and
//! the quit flag for the whole process. Platform callbacks only forward to its
//! named transitions, so every transition can be driven without a windowing
//! system.
//!
//! ```text
//! Starting ──startup──▶ Running{Visible|Hidden} ──quit──▶ Quitting ──▶ Terminated
//!     └──lock held elsewhere──────────────────────────────────────────▶ Terminated
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::screen::{DisplaySource, ScreenCatalog, ScreenDescriptor};
use crate::shortcuts::{
    ApplyReport, ShortcutAction, ShortcutConfigStore, ShortcutHost, ShortcutRegistry,
    ShortcutsConfig,
};
use crate::tray::{TrayController, TrayHost, TrayMenuAction};
use crate::window::{WindowFactory, WindowManager, WindowState};

/// Bundles the backend types of one platform.
pub trait ShellPlatform {
    type Displays: DisplaySource;
    type Windows: WindowFactory;
    type Tray: TrayHost;
    type Shortcuts: ShortcutHost;
}

/// OS-level single-instance lock.
pub trait InstanceLock {
    /// True when this process now owns the application role.
    fn acquire(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Running,
    Quitting,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOutcome {
    Started,
    /// Another process holds the lock; nothing was created.
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Keep the window alive; it was hidden to the tray instead.
    Prevent,
    Proceed,
}

/// What the platform binding must do after a tray menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    Nothing,
    ExitProcess,
}

/// Which destructive shutdown steps actually ran on this call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    pub shortcuts_released: bool,
    pub tray_destroyed: bool,
    pub window_destroyed: bool,
    pub already_terminated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateShortcutsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ShortcutsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateShortcutsResponse {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            config: None,
            error: Some(error.into()),
        }
    }
}

pub struct LifecycleCoordinator<P: ShellPlatform> {
    phase: Phase,
    is_quitting: bool,
    screens: ScreenCatalog<P::Displays>,
    window: WindowManager<P::Windows>,
    tray: TrayController<P::Tray>,
    shortcuts: ShortcutRegistry<P::Shortcuts>,
    store: ShortcutConfigStore,
    config: ShortcutsConfig,
}

impl<P: ShellPlatform> LifecycleCoordinator<P> {
    pub fn new(
        screens: ScreenCatalog<P::Displays>,
        window: WindowManager<P::Windows>,
        tray: TrayController<P::Tray>,
        shortcuts: ShortcutRegistry<P::Shortcuts>,
        store: ShortcutConfigStore,
    ) -> Self {
        Self {
            phase: Phase::Starting,
            is_quitting: false,
            screens,
            window,
            tray,
            shortcuts,
            store,
            config: ShortcutsConfig::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Sub-mode while running; `None` in every other phase.
    pub fn visibility(&self) -> Option<Visibility> {
        (self.phase == Phase::Running).then(|| {
            if self.window.is_visible() {
                Visibility::Visible
            } else {
                Visibility::Hidden
            }
        })
    }

    pub fn is_quitting(&self) -> bool {
        self.is_quitting
    }

    pub fn config(&self) -> &ShortcutsConfig {
        &self.config
    }

    // ─── Startup ───

    pub fn startup(&mut self, lock: &mut impl InstanceLock) -> StartupOutcome {
        if self.phase != Phase::Starting {
            tracing::debug!(phase = ?self.phase, "startup requested twice");
            return StartupOutcome::Started;
        }
        if !lock.acquire() {
            tracing::info!("another instance owns the shell; exiting");
            self.phase = Phase::Terminated;
            return StartupOutcome::AlreadyRunning;
        }

        self.config = self.store.load();
        self.ensure_window();
        self.tray.create(&self.config);
        let report = self.shortcuts.apply(&self.config);
        if !report.is_complete() {
            tracing::warn!(failed = report.failed.len(), "some global shortcuts are unavailable");
        }
        self.phase = Phase::Running;
        tracing::info!("shell running");
        StartupOutcome::Started
    }

    fn ensure_window(&mut self) -> bool {
        if self.window.has_window() {
            return true;
        }
        let Some(screen) = self.screens.primary_screen() else {
            tracing::warn!("no displays available for the overlay window");
            return false;
        };
        match self.window.create(&screen) {
            Ok(_) => true,
            Err(err) => {
                tracing::error!(%err, "failed to create overlay window");
                false
            }
        }
    }

    /// Show and focus the window, recreating it when it no longer exists.
    /// A recreated window becomes visible on [`Self::content_ready`].
    fn reveal(&mut self) -> bool {
        if self.window.has_window() {
            self.window.restore()
        } else {
            self.ensure_window()
        }
    }

    // ─── Window events ───

    pub fn content_ready(&mut self) -> bool {
        self.window.content_ready()
    }

    pub fn focus_changed(&mut self, focused: bool) {
        self.window.focus_changed(focused);
    }

    pub fn close_requested(&mut self) -> CloseDecision {
        if self.is_quitting {
            return CloseDecision::Proceed;
        }
        self.window.hide();
        CloseDecision::Prevent
    }

    pub fn window_closed(&mut self) {
        if self.window.window_closed() {
            tracing::debug!("overlay window closed by the platform");
        }
    }

    // ─── Instance & app events ───

    /// A duplicate launch was detected by the running instance.
    pub fn second_instance(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        tracing::info!("second launch detected; focusing existing window");
        self.reveal()
    }

    /// The platform re-activated the app (e.g. dock icon click).
    pub fn reactivate(&mut self) -> bool {
        self.phase == Phase::Running && self.reveal()
    }

    /// Whether the platform may exit the process now. Hiding or closing the
    /// window never ends the app on its own.
    pub fn exit_requested(&self) -> bool {
        self.is_quitting
    }

    // ─── Canvas requests ───

    pub fn list_screens(&self) -> Vec<ScreenDescriptor> {
        self.screens.list_screens()
    }

    pub fn switch_screen(&mut self, screen_id: u32) -> bool {
        self.window.switch_to(&self.screens, screen_id)
    }

    pub fn minimize(&mut self) -> bool {
        self.window.minimize()
    }

    pub fn set_always_on_top(&mut self, enabled: bool) -> bool {
        self.window.set_always_on_top(enabled)
    }

    pub fn window_info(&self) -> Option<WindowState> {
        self.window.info()
    }

    pub fn hide_to_tray(&mut self) -> bool {
        self.window.hide()
    }

    pub fn show_from_tray(&mut self) -> bool {
        if self.phase == Phase::Running {
            self.reveal();
        }
        true
    }

    /// Load-merge-save-reregister. Nothing is re-registered unless the merged
    /// config was persisted.
    pub fn update_shortcuts(&mut self, partial: &Value) -> UpdateShortcutsResponse {
        if self.is_quitting || self.phase != Phase::Running {
            return UpdateShortcutsResponse::failed("application is not running");
        }
        let Some(merged) = self.store.update(partial) else {
            return UpdateShortcutsResponse::failed("failed to save shortcuts configuration");
        };

        self.config = merged.clone();
        self.shortcuts.apply(&self.config);
        self.tray.rebuild(&self.config);
        UpdateShortcutsResponse {
            success: true,
            config: Some(merged),
            error: None,
        }
    }

    /// Only while running: after shutdown the tray and shortcuts stay released.
    pub fn reset_shortcuts(&mut self) -> ApplyReport {
        if self.is_quitting || self.phase != Phase::Running {
            tracing::debug!(phase = ?self.phase, "shortcut reset ignored");
            return ApplyReport::default();
        }
        let (config, report) = self.shortcuts.reset_to_defaults(&self.store);
        self.config = config;
        self.tray.rebuild(&self.config);
        report
    }

    // ─── Tray & shortcut events ───

    pub fn tray_menu(&mut self, action: TrayMenuAction) -> Followup {
        match action {
            TrayMenuAction::Show => {
                self.show_from_tray();
            }
            TrayMenuAction::Hide => {
                self.hide_to_tray();
            }
            TrayMenuAction::ResetShortcuts => {
                self.reset_shortcuts();
            }
            TrayMenuAction::Quit => {
                self.quit();
                return Followup::ExitProcess;
            }
        }
        Followup::Nothing
    }

    pub fn tray_double_click(&mut self) {
        let action = TrayController::<P::Tray>::double_click_action(self.window.is_visible());
        self.tray_menu(action);
    }

    pub fn shortcut_triggered(&mut self, action: ShortcutAction) {
        tracing::debug!(?action, "global shortcut triggered");
        match action {
            ShortcutAction::HideToTray => {
                self.hide_to_tray();
            }
            ShortcutAction::ShowFromTray => {
                self.show_from_tray();
            }
        }
    }

    // ─── Shutdown ───

    /// Set the quit flag and tear everything down. Safe to call from every
    /// trigger path: each resource is released at most once.
    pub fn quit(&mut self) -> ShutdownReport {
        self.is_quitting = true;
        if self.phase == Phase::Terminated {
            return ShutdownReport {
                already_terminated: true,
                ..ShutdownReport::default()
            };
        }

        self.phase = Phase::Quitting;
        let report = ShutdownReport {
            shortcuts_released: self.shortcuts.unregister_all(),
            tray_destroyed: self.tray.destroy(),
            window_destroyed: self.window.destroy(),
            already_terminated: false,
        };
        self.phase = Phase::Terminated;
        tracing::info!(?report, "shell shut down");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FakeDisplays, FakeLock, FakePlatform, FakeShortcuts, FakeTray, FakeWindows, Journal,
        ShortcutCall, WindowCall,
    };
    use serde_json::json;
    use tempfile::TempDir;

    struct Harness {
        shell: LifecycleCoordinator<FakePlatform>,
        windows: FakeWindows,
        tray: FakeTray,
        shortcuts: FakeShortcuts,
        journal: Journal,
        _dir: TempDir,
    }

    fn harness_with_store(dir: TempDir, store: ShortcutConfigStore) -> Harness {
        let journal = Journal::default();
        let windows = FakeWindows::with_journal(journal.clone());
        let tray = FakeTray::with_journal(journal.clone());
        let shortcuts = FakeShortcuts::with_journal(journal.clone());
        let shell = LifecycleCoordinator::new(
            ScreenCatalog::new(FakeDisplays::dual()),
            WindowManager::new(windows.clone()),
            TrayController::new(tray.clone(), None),
            ShortcutRegistry::new(shortcuts.clone()),
            store,
        );
        Harness {
            shell,
            windows,
            tray,
            shortcuts,
            journal,
            _dir: dir,
        }
    }

    fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = ShortcutConfigStore::in_dir(dir.path());
        harness_with_store(dir, store)
    }

    fn running() -> Harness {
        let mut h = harness();
        assert_eq!(h.shell.startup(&mut FakeLock(true)), StartupOutcome::Started);
        h.shell.content_ready();
        h
    }

    #[test]
    fn test_startup_creates_window_tray_and_shortcuts() {
        let h = running();
        assert_eq!(h.shell.phase(), Phase::Running);
        assert_eq!(h.shell.visibility(), Some(Visibility::Visible));
        assert_eq!(h.windows.create_count(), 1);
        assert_eq!(h.tray.install_count(), 1);
        assert_eq!(h.shortcuts.registered().len(), 2);
    }

    #[test]
    fn test_window_hidden_until_content_ready() {
        let mut h = harness();
        h.shell.startup(&mut FakeLock(true));
        assert_eq!(h.shell.visibility(), Some(Visibility::Hidden));
        h.shell.content_ready();
        assert_eq!(h.shell.visibility(), Some(Visibility::Visible));
    }

    #[test]
    fn test_lock_held_elsewhere_creates_nothing() {
        let mut h = harness();
        assert_eq!(
            h.shell.startup(&mut FakeLock(false)),
            StartupOutcome::AlreadyRunning
        );
        assert_eq!(h.shell.phase(), Phase::Terminated);
        assert_eq!(h.windows.create_count(), 0);
        assert_eq!(h.tray.install_count(), 0);
        assert!(h.shortcuts.calls().is_empty());
    }

    #[test]
    fn test_second_instance_focuses_existing_window() {
        let mut h = running();
        h.shell.minimize();
        assert!(h.shell.second_instance());
        assert_eq!(h.windows.create_count(), 1);
        let info = h.shell.window_info().unwrap();
        assert!(info.visible);
        assert!(!info.minimized);
        assert!(h.windows.calls().contains(&WindowCall::Unminimize));
    }

    #[test]
    fn test_close_is_intercepted_while_not_quitting() {
        let mut h = running();
        assert_eq!(h.shell.close_requested(), CloseDecision::Prevent);
        let info = h.shell.window_info().expect("window still queryable");
        assert!(!info.visible);
        assert_eq!(h.shell.visibility(), Some(Visibility::Hidden));
        assert!(!h.windows.calls().contains(&WindowCall::Destroy));
    }

    #[test]
    fn test_close_proceeds_once_quitting() {
        let mut h = running();
        h.shell.quit();
        assert_eq!(h.shell.close_requested(), CloseDecision::Proceed);
    }

    #[test]
    fn test_repeated_quit_releases_each_resource_once() {
        let mut h = running();
        let first = h.shell.quit();
        assert!(first.shortcuts_released && first.tray_destroyed && first.window_destroyed);

        for _ in 0..3 {
            let again = h.shell.quit();
            assert!(again.already_terminated);
            assert!(!again.window_destroyed);
        }

        assert_eq!(h.shell.phase(), Phase::Terminated);
        assert_eq!(h.tray.remove_count(), 1);
        let window_calls = h.windows.calls();
        assert_eq!(window_calls.iter().filter(|c| **c == WindowCall::Destroy).count(), 1);
        assert_eq!(
            window_calls.iter().filter(|c| **c == WindowCall::DestroyContent).count(),
            1
        );
        // One clear from startup's apply, one from shutdown.
        let clears = h
            .shortcuts
            .calls()
            .into_iter()
            .filter(|c| *c == ShortcutCall::UnregisterAll)
            .count();
        assert_eq!(clears, 2);
    }

    #[test]
    fn test_shutdown_order() {
        let mut h = running();
        let mark = h.journal.len();
        h.shell.quit();
        assert_eq!(
            h.journal.since(mark),
            vec![
                "shortcuts:unregister_all",
                "tray:remove",
                "window:destroy_content",
                "window:destroy"
            ]
        );
    }

    #[test]
    fn test_closed_event_after_quit_is_ignored() {
        let mut h = running();
        h.shell.quit();
        h.shell.window_closed();
        assert_eq!(h.shell.phase(), Phase::Terminated);
    }

    #[test]
    fn test_exit_only_allowed_once_quitting() {
        let mut h = running();
        h.shell.hide_to_tray();
        assert!(!h.shell.exit_requested());
        h.shell.quit();
        assert!(h.shell.exit_requested());
    }

    #[test]
    fn test_tray_quit_sets_flag_before_exit() {
        let mut h = running();
        assert_eq!(h.shell.tray_menu(TrayMenuAction::Quit), Followup::ExitProcess);
        assert!(h.shell.is_quitting());
        assert_eq!(h.shell.close_requested(), CloseDecision::Proceed);
    }

    #[test]
    fn test_tray_double_click_toggles_visibility() {
        let mut h = running();
        h.shell.tray_double_click();
        assert_eq!(h.shell.visibility(), Some(Visibility::Hidden));
        h.shell.tray_double_click();
        assert_eq!(h.shell.visibility(), Some(Visibility::Visible));
    }

    #[test]
    fn test_shortcuts_hide_and_show() {
        let mut h = running();
        h.shell.shortcut_triggered(ShortcutAction::HideToTray);
        assert_eq!(h.shell.visibility(), Some(Visibility::Hidden));
        h.shell.shortcut_triggered(ShortcutAction::ShowFromTray);
        assert_eq!(h.shell.visibility(), Some(Visibility::Visible));
    }

    #[test]
    fn test_show_from_tray_recreates_closed_window() {
        let mut h = running();
        h.shell.window_closed();
        assert!(h.shell.window_info().is_none());
        assert!(h.shell.show_from_tray());
        assert_eq!(h.windows.create_count(), 2);
    }

    #[test]
    fn test_update_merges_and_reregisters() {
        let mut h = running();
        let response = h.shell.update_shortcuts(&json!({ "hideToTray": "Alt+Shift+H" }));
        assert!(response.success);
        let config = response.config.unwrap();
        assert_eq!(config.hide_to_tray, "Alt+Shift+H");
        assert_eq!(config.show_from_tray, "Mod+Shift+S");
        assert!(h.shortcuts.registered().contains(&"Alt+Shift+H".to_string()));
        assert_eq!(h.tray.install_count(), 2);
        assert!(h.tray.last_labels().contains(&"Hide to Tray: Alt+Shift+H".to_string()));
    }

    #[test]
    fn test_update_with_blank_value_keeps_binding() {
        let mut h = running();
        let response = h.shell.update_shortcuts(&json!({ "showFromTray": "" }));
        assert!(response.success);
        assert_eq!(h.shell.config().show_from_tray, "Mod+Shift+S");
    }

    #[test]
    fn test_update_save_failure_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = ShortcutConfigStore::in_dir(&blocker);
        let mut h = harness_with_store(dir, store);
        h.shell.startup(&mut FakeLock(true));
        let registrations = h.shortcuts.calls().len();

        let response = h.shell.update_shortcuts(&json!({ "hideToTray": "Alt+H" }));
        assert!(!response.success);
        assert!(response.error.is_some());
        assert_eq!(h.shell.config(), &ShortcutsConfig::default());
        assert_eq!(h.shortcuts.calls().len(), registrations);
    }

    #[test]
    fn test_update_response_serialization() {
        let ok = UpdateShortcutsResponse {
            success: true,
            config: Some(ShortcutsConfig::default()),
            error: None,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["config"]["hideToTray"], "Mod+Shift+H");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_reset_shortcuts_restores_defaults() {
        let mut h = running();
        h.shell.update_shortcuts(&json!({ "hideToTray": "Alt+H", "showFromTray": "Alt+S" }));
        let followup = h.shell.tray_menu(TrayMenuAction::ResetShortcuts);
        assert_eq!(followup, Followup::Nothing);
        assert_eq!(h.shell.config(), &ShortcutsConfig::default());
        assert!(
            h.shortcuts
                .registered()
                .contains(&"CommandOrControl+Shift+H".to_string())
        );
    }

    #[test]
    fn test_reset_after_quit_touches_nothing() {
        let mut h = running();
        h.shell.quit();
        let mark = h.journal.len();

        let followup = h.shell.tray_menu(TrayMenuAction::ResetShortcuts);
        assert_eq!(followup, Followup::Nothing);
        assert!(h.journal.since(mark).is_empty());
        assert!(h.shortcuts.registered().is_empty());

        assert!(h.shell.quit().already_terminated);
        assert_eq!(h.tray.install_count(), 1);
        assert_eq!(h.tray.remove_count(), 1);
    }

    #[test]
    fn test_shortcut_changes_ignored_when_never_started() {
        let mut h = harness();
        h.shell.startup(&mut FakeLock(false));

        assert!(!h.shell.update_shortcuts(&json!({ "hideToTray": "Alt+H" })).success);
        assert_eq!(h.shell.reset_shortcuts(), ApplyReport::default());
        assert_eq!(h.journal.len(), 0);
        assert!(h.shortcuts.calls().is_empty());
        assert_eq!(h.tray.install_count(), 0);
    }

    #[test]
    fn test_unknown_screen_switch_leaves_bounds() {
        let mut h = running();
        let before = h.shell.window_info().unwrap().bounds;
        assert!(!h.shell.switch_screen(999));
        assert_eq!(h.shell.window_info().unwrap().bounds, before);
        assert!(h.shell.switch_screen(2));
    }

    #[test]
    fn test_requests_after_shutdown_fail_quietly() {
        let mut h = running();
        h.shell.quit();
        assert!(!h.shell.minimize());
        assert!(!h.shell.hide_to_tray());
        assert!(h.shell.window_info().is_none());
        assert!(!h.shell.second_instance());
        assert!(!h.shell.update_shortcuts(&json!({})).success);
    }
}
