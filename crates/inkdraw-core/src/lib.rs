pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod placement;
pub mod screen;
pub mod shortcuts;
pub mod tray;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ShellError, ShellResult};
pub use geometry::{Point, Rect, Size};
pub use lifecycle::{
    CloseDecision, Followup, InstanceLock, LifecycleCoordinator, Phase, ShellPlatform,
    ShutdownReport, StartupOutcome, UpdateShortcutsResponse, Visibility,
};
pub use placement::{ClientRect, DEFAULT_PANEL_SIZE, place_panel};
pub use screen::{Display, DisplaySource, ScreenCatalog, ScreenDescriptor};
pub use shortcuts::{
    ApplyReport, ShortcutAction, ShortcutConfigStore, ShortcutHost, ShortcutRegistry,
    ShortcutsConfig,
};
pub use tray::{
    TRAY_ID, TRAY_TOOLTIP, TrayController, TrayHost, TrayIcon, TrayMenu, TrayMenuAction,
    TrayMenuEntry,
};
pub use window::{
    OverlayWindow, StackingLevel, WindowFactory, WindowManager, WindowSpec, WindowState,
};
