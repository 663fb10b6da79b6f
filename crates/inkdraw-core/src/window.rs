//! Overlay window management.
//!
//! The manager owns at most one borderless overlay window and is the only
//! writer of its [`WindowState`]. Platform calls go through [`OverlayWindow`];
//! every failure is logged and reported as `false` rather than propagated.

use serde::Serialize;

use crate::error::ShellResult;
use crate::geometry::Rect;
use crate::screen::{DisplaySource, ScreenCatalog, ScreenDescriptor};

/// Window stacking priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackingLevel {
    /// Regular stacking, other applications can cover the overlay.
    Normal,
    /// Elevated level that stays above full-screen applications.
    ScreenSaver,
}

impl StackingLevel {
    fn for_preference(always_on_top: bool) -> Self {
        if always_on_top {
            StackingLevel::ScreenSaver
        } else {
            StackingLevel::Normal
        }
    }
}

/// Parameters for creating the overlay window. The window always starts hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub bounds: Rect,
    pub stacking: StackingLevel,
}

pub trait OverlayWindow {
    fn set_bounds(&mut self, bounds: Rect) -> ShellResult<()>;
    fn set_stacking(&mut self, level: StackingLevel) -> ShellResult<()>;
    fn show(&mut self) -> ShellResult<()>;
    fn hide(&mut self) -> ShellResult<()>;
    fn focus(&mut self) -> ShellResult<()>;
    fn minimize(&mut self) -> ShellResult<()>;
    fn unminimize(&mut self) -> ShellResult<()>;
    /// Live platform state; the user can minimize or restore the window
    /// without going through the manager.
    fn is_minimized(&self) -> ShellResult<bool>;
    fn is_destroyed(&self) -> bool;
    /// Tear down the hosted web content before the window itself goes away.
    fn destroy_content(&mut self) -> ShellResult<()>;
    fn destroy(&mut self) -> ShellResult<()>;
}

pub trait WindowFactory {
    type Window: OverlayWindow;

    fn create(&mut self, spec: &WindowSpec) -> ShellResult<Self::Window>;
}

/// Snapshot of the overlay window as seen by the canvas surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub bounds: Rect,
    /// Effective value, demoted while the window is unfocused.
    pub always_on_top: bool,
    pub current_screen_id: Option<u32>,
    pub visible: bool,
    pub minimized: bool,
    pub focused: bool,
}

struct ManagedWindow<W> {
    handle: W,
    state: WindowState,
    /// Set by the first content load; later loads never re-show the window.
    revealed: bool,
}

impl<W: OverlayWindow> ManagedWindow<W> {
    fn minimized(&self) -> bool {
        match self.handle.is_minimized() {
            Ok(minimized) => minimized,
            Err(err) => {
                tracing::debug!(%err, "minimized state unavailable; using last known");
                self.state.minimized
            }
        }
    }
}

pub struct WindowManager<F: WindowFactory> {
    factory: F,
    window: Option<ManagedWindow<F::Window>>,
    /// User-level always-on-top preference; survives focus changes.
    pin_preference: bool,
}

impl<F: WindowFactory> WindowManager<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            window: None,
            pin_preference: true,
        }
    }

    pub fn has_window(&self) -> bool {
        self.live().is_some()
    }

    pub fn always_on_top_preference(&self) -> bool {
        self.pin_preference
    }

    fn live(&self) -> Option<&ManagedWindow<F::Window>> {
        self.window.as_ref().filter(|w| !w.handle.is_destroyed())
    }

    fn live_mut(&mut self) -> Option<&mut ManagedWindow<F::Window>> {
        self.window.as_mut().filter(|w| !w.handle.is_destroyed())
    }

    /// Create the overlay covering `screen`'s work area.
    ///
    /// Returns the existing state unchanged when a window is already alive.
    pub fn create(&mut self, screen: &ScreenDescriptor) -> ShellResult<WindowState> {
        if let Some(existing) = self.live() {
            return Ok(existing.state.clone());
        }

        let spec = WindowSpec {
            bounds: screen.work_area,
            stacking: StackingLevel::for_preference(self.pin_preference),
        };
        let handle = self.factory.create(&spec)?;
        let state = WindowState {
            bounds: screen.work_area,
            always_on_top: self.pin_preference,
            current_screen_id: Some(screen.id),
            visible: false,
            minimized: false,
            focused: false,
        };
        tracing::info!(screen = screen.id, bounds = ?screen.work_area, "overlay window created");
        self.window = Some(ManagedWindow {
            handle,
            state: state.clone(),
            revealed: false,
        });
        Ok(state)
    }

    /// The hosted content finished its initial load: reveal and focus.
    /// Reloads of an already revealed window leave its visibility alone.
    pub fn content_ready(&mut self) -> bool {
        let Some(window) = self.live_mut() else {
            return false;
        };
        if window.revealed {
            return false;
        }
        window.revealed = true;
        self.show()
    }

    pub fn switch_to<D: DisplaySource>(&mut self, catalog: &ScreenCatalog<D>, screen_id: u32) -> bool {
        let Some(window) = self.live_mut() else {
            return false;
        };
        let Some(screen) = catalog.find_screen(screen_id) else {
            tracing::debug!(screen_id, "switch requested for unknown screen");
            return false;
        };

        match window.handle.set_bounds(screen.work_area) {
            Ok(()) => {
                window.state.bounds = screen.work_area;
                window.state.current_screen_id = Some(screen.id);
                true
            }
            Err(err) => {
                tracing::warn!(%err, screen_id, "failed to move overlay window");
                false
            }
        }
    }

    pub fn set_always_on_top(&mut self, enabled: bool) -> bool {
        let Some(window) = self.live_mut() else {
            return false;
        };
        if let Err(err) = window
            .handle
            .set_stacking(StackingLevel::for_preference(enabled))
        {
            tracing::warn!(%err, enabled, "failed to change always-on-top");
            return false;
        }
        window.state.always_on_top = enabled;
        self.pin_preference = enabled;
        true
    }

    /// Focus-linked auto-toggle: blur demotes, focus restores the elevated
    /// level, both only while the user preference is on.
    pub fn focus_changed(&mut self, focused: bool) {
        let pinned = self.pin_preference;
        let Some(window) = self.live_mut() else {
            return;
        };
        window.state.focused = focused;
        if focused {
            window.state.minimized = window.minimized();
        }
        if !pinned {
            return;
        }

        let level = StackingLevel::for_preference(focused);
        match window.handle.set_stacking(level) {
            Ok(()) => window.state.always_on_top = focused,
            Err(err) => tracing::warn!(%err, focused, "failed to follow focus change"),
        }
    }

    pub fn minimize(&mut self) -> bool {
        let Some(window) = self.live_mut() else {
            return false;
        };
        match window.handle.minimize() {
            Ok(()) => {
                window.state.minimized = true;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "failed to minimize overlay window");
                false
            }
        }
    }

    pub fn info(&self) -> Option<WindowState> {
        self.live().map(|window| WindowState {
            minimized: window.minimized(),
            ..window.state.clone()
        })
    }

    pub fn is_visible(&self) -> bool {
        self.live().is_some_and(|window| window.state.visible)
    }

    pub fn hide(&mut self) -> bool {
        let Some(window) = self.live_mut() else {
            return false;
        };
        match window.handle.hide() {
            Ok(()) => {
                window.state.visible = false;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "failed to hide overlay window");
                false
            }
        }
    }

    /// Show and focus an existing window. Returns false when there is none;
    /// lazy recreation is the coordinator's job since it needs a target screen.
    pub fn show(&mut self) -> bool {
        let Some(window) = self.live_mut() else {
            return false;
        };
        if let Err(err) = window.handle.show() {
            tracing::warn!(%err, "failed to show overlay window");
            return false;
        }
        window.state.visible = true;
        if let Err(err) = window.handle.focus() {
            tracing::debug!(%err, "overlay window shown without focus");
        }
        true
    }

    /// Bring a minimized or hidden window back to the front.
    pub fn restore(&mut self) -> bool {
        if let Some(window) = self.live_mut()
            && window.minimized()
        {
            match window.handle.unminimize() {
                Ok(()) => window.state.minimized = false,
                Err(err) => tracing::warn!(%err, "failed to restore overlay window"),
            }
        }
        self.show()
    }

    /// The platform reports the window as closed. Ignored after
    /// [`Self::destroy`], which already forgot the window.
    pub fn window_closed(&mut self) -> bool {
        self.window.take().is_some()
    }

    /// Tear the window down: forget it, destroy the content, destroy the
    /// window. Returns false when there was nothing left to destroy.
    pub fn destroy(&mut self) -> bool {
        // Forgotten first, so a closed event raised by the teardown is a no-op.
        let Some(mut window) = self.window.take() else {
            return false;
        };
        if window.handle.is_destroyed() {
            return false;
        }

        if let Err(err) = window.handle.destroy_content() {
            tracing::warn!(%err, "failed to tear down window content");
        }
        if let Err(err) = window.handle.destroy() {
            tracing::warn!(%err, "failed to destroy overlay window");
        }
        true
    }
}
