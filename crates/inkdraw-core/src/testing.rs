//! Recording fake backends for unit tests.
//!
//! Each fake is a cheap clone over shared state, so a test keeps one handle
//! for assertions while the component under test owns the other. Fakes built
//! from the same [`Journal`] record a single global call order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ShellError, ShellResult};
use crate::geometry::Rect;
use crate::lifecycle::{InstanceLock, ShellPlatform};
use crate::screen::{Display, DisplaySource};
use crate::shortcuts::{ShortcutAction, ShortcutHost};
use crate::tray::{TrayHost, TrayIcon, TrayMenu};
use crate::window::{OverlayWindow, StackingLevel, WindowFactory, WindowSpec};

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    fn record(&self, entry: &str) {
        self.0.borrow_mut().push(entry.to_string());
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn since(&self, mark: usize) -> Vec<String> {
        self.0.borrow()[mark..].to_vec()
    }
}

// ─── Displays ───

#[derive(Clone)]
pub struct FakeDisplays(Vec<Display>);

impl FakeDisplays {
    pub fn new(displays: Vec<Display>) -> Self {
        Self(displays)
    }

    /// Primary 1920x1080 at the origin, 2560x1440 to its right.
    pub fn dual() -> Self {
        Self(vec![
            Display {
                id: 1,
                bounds: Rect::new(0, 0, 1920, 1080),
                work_area: Rect::new(0, 0, 1920, 1040),
            },
            Display {
                id: 2,
                bounds: Rect::new(1920, 0, 2560, 1440),
                work_area: Rect::new(1920, 0, 2560, 1400),
            },
        ])
    }
}

impl DisplaySource for FakeDisplays {
    fn displays(&self) -> Vec<Display> {
        self.0.clone()
    }
}

// ─── Windows ───

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCall {
    SetBounds(Rect),
    Stacking(StackingLevel),
    Show,
    Hide,
    Focus,
    Minimize,
    Unminimize,
    DestroyContent,
    Destroy,
}

#[derive(Default)]
struct WindowLog {
    specs: Vec<WindowSpec>,
    calls: Vec<WindowCall>,
    minimized: bool,
}

#[derive(Clone, Default)]
pub struct FakeWindows {
    log: Rc<RefCell<WindowLog>>,
    journal: Journal,
}

impl FakeWindows {
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            log: Rc::default(),
            journal,
        }
    }

    pub fn created_specs(&self) -> Vec<WindowSpec> {
        self.log.borrow().specs.clone()
    }

    pub fn create_count(&self) -> usize {
        self.log.borrow().specs.len()
    }

    pub fn calls(&self) -> Vec<WindowCall> {
        self.log.borrow().calls.clone()
    }

    /// Minimize or restore from outside the manager, as the taskbar does.
    pub fn set_platform_minimized(&self, minimized: bool) {
        self.log.borrow_mut().minimized = minimized;
    }

    pub fn stacking_history(&self) -> Vec<StackingLevel> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WindowCall::Stacking(level) => Some(level),
                _ => None,
            })
            .collect()
    }
}

impl WindowFactory for FakeWindows {
    type Window = FakeWindow;

    fn create(&mut self, spec: &WindowSpec) -> ShellResult<FakeWindow> {
        let mut log = self.log.borrow_mut();
        log.specs.push(spec.clone());
        log.minimized = false;
        drop(log);
        self.journal.record("window:create");
        Ok(FakeWindow {
            log: Rc::clone(&self.log),
            journal: self.journal.clone(),
            destroyed: false,
        })
    }
}

pub struct FakeWindow {
    log: Rc<RefCell<WindowLog>>,
    journal: Journal,
    destroyed: bool,
}

impl FakeWindow {
    fn record(&self, call: WindowCall) -> ShellResult<()> {
        if self.destroyed {
            return Err(ShellError::Window("window already destroyed".into()));
        }
        self.log.borrow_mut().calls.push(call);
        Ok(())
    }
}

impl OverlayWindow for FakeWindow {
    fn set_bounds(&mut self, bounds: Rect) -> ShellResult<()> {
        self.record(WindowCall::SetBounds(bounds))
    }

    fn set_stacking(&mut self, level: StackingLevel) -> ShellResult<()> {
        self.record(WindowCall::Stacking(level))
    }

    fn show(&mut self) -> ShellResult<()> {
        self.record(WindowCall::Show)
    }

    fn hide(&mut self) -> ShellResult<()> {
        self.record(WindowCall::Hide)
    }

    fn focus(&mut self) -> ShellResult<()> {
        self.record(WindowCall::Focus)
    }

    fn minimize(&mut self) -> ShellResult<()> {
        self.record(WindowCall::Minimize)?;
        self.log.borrow_mut().minimized = true;
        Ok(())
    }

    fn unminimize(&mut self) -> ShellResult<()> {
        self.record(WindowCall::Unminimize)?;
        self.log.borrow_mut().minimized = false;
        Ok(())
    }

    fn is_minimized(&self) -> ShellResult<bool> {
        if self.destroyed {
            return Err(ShellError::Window("window already destroyed".into()));
        }
        Ok(self.log.borrow().minimized)
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy_content(&mut self) -> ShellResult<()> {
        self.journal.record("window:destroy_content");
        self.record(WindowCall::DestroyContent)
    }

    fn destroy(&mut self) -> ShellResult<()> {
        self.journal.record("window:destroy");
        self.record(WindowCall::Destroy)?;
        self.destroyed = true;
        Ok(())
    }
}

// ─── Tray ───

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayCall {
    /// Menu labels with their enabled flag.
    Install(Vec<(String, bool)>),
    Remove,
}

#[derive(Default)]
struct TrayLog {
    calls: Vec<TrayCall>,
    icon_sizes: Vec<(u32, u32)>,
    fail: bool,
}

#[derive(Clone, Default)]
pub struct FakeTray {
    log: Rc<RefCell<TrayLog>>,
    journal: Journal,
}

impl FakeTray {
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            log: Rc::default(),
            journal,
        }
    }

    /// Every install attempt fails, as on a desktop without a tray.
    pub fn failing(self) -> Self {
        self.log.borrow_mut().fail = true;
        self
    }

    pub fn calls(&self) -> Vec<TrayCall> {
        self.log.borrow().calls.clone()
    }

    pub fn install_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, TrayCall::Install(_)))
            .count()
    }

    pub fn remove_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == TrayCall::Remove)
            .count()
    }

    pub fn last_labels(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .rev()
            .find_map(|call| match call {
                TrayCall::Install(labels) => {
                    Some(labels.into_iter().map(|(label, _)| label).collect())
                }
                TrayCall::Remove => None,
            })
            .unwrap_or_default()
    }

    pub fn last_icon_size(&self) -> Option<(u32, u32)> {
        self.log.borrow().icon_sizes.last().copied()
    }
}

impl TrayHost for FakeTray {
    fn install(&mut self, icon: &TrayIcon, menu: &TrayMenu) -> ShellResult<()> {
        let mut log = self.log.borrow_mut();
        if log.fail {
            return Err(ShellError::Tray("no status notifier host".into()));
        }
        log.icon_sizes.push(icon.size());
        log.calls.push(TrayCall::Install(menu.labels()));
        self.journal.record("tray:install");
        Ok(())
    }

    fn remove(&mut self) -> ShellResult<()> {
        self.log.borrow_mut().calls.push(TrayCall::Remove);
        self.journal.record("tray:remove");
        Ok(())
    }
}

// ─── Shortcuts ───

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutCall {
    Register(String, ShortcutAction),
    UnregisterAll,
}

#[derive(Default)]
struct ShortcutLog {
    calls: Vec<ShortcutCall>,
    registered: Vec<String>,
    claimed: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeShortcuts {
    log: Rc<RefCell<ShortcutLog>>,
    journal: Journal,
}

impl FakeShortcuts {
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            log: Rc::default(),
            journal,
        }
    }

    /// Mark an accelerator as owned by another application.
    pub fn claimed(self, accelerator: &str) -> Self {
        self.log.borrow_mut().claimed.push(accelerator.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ShortcutCall> {
        self.log.borrow().calls.clone()
    }

    /// Accelerators currently held.
    pub fn registered(&self) -> Vec<String> {
        self.log.borrow().registered.clone()
    }
}

impl ShortcutHost for FakeShortcuts {
    fn register(&mut self, accelerator: &str, action: ShortcutAction) -> ShellResult<()> {
        let mut log = self.log.borrow_mut();
        log.calls
            .push(ShortcutCall::Register(accelerator.to_string(), action));
        if log.claimed.iter().any(|c| c == accelerator) {
            return Err(ShellError::Shortcut {
                accelerator: accelerator.to_string(),
                reason: "already registered by another application".into(),
            });
        }
        log.registered.push(accelerator.to_string());
        self.journal.record("shortcuts:register");
        Ok(())
    }

    fn unregister_all(&mut self) -> ShellResult<()> {
        let mut log = self.log.borrow_mut();
        log.calls.push(ShortcutCall::UnregisterAll);
        log.registered.clear();
        self.journal.record("shortcuts:unregister_all");
        Ok(())
    }
}

// ─── Platform ───

pub struct FakePlatform;

impl ShellPlatform for FakePlatform {
    type Displays = FakeDisplays;
    type Windows = FakeWindows;
    type Tray = FakeTray;
    type Shortcuts = FakeShortcuts;
}

pub struct FakeLock(pub bool);

impl InstanceLock for FakeLock {
    fn acquire(&mut self) -> bool {
        self.0
    }
}
