use inkdraw_core::{
    OverlayWindow, Rect, ShellError, ShellResult, StackingLevel, WindowFactory, WindowSpec,
};
use tauri::webview::PageLoadEvent;
use tauri::{
    AppHandle, Manager, PhysicalPosition, PhysicalSize, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};

use crate::state::dispatch;

pub const MAIN_WINDOW_LABEL: &str = "main";

fn window_error(err: tauri::Error) -> ShellError {
    ShellError::Window(err.to_string())
}

pub struct TauriWindows {
    app: AppHandle,
}

impl TauriWindows {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl WindowFactory for TauriWindows {
    type Window = TauriWindow;

    fn create(&mut self, spec: &WindowSpec) -> ShellResult<TauriWindow> {
        let window = WebviewWindowBuilder::new(
            &self.app,
            MAIN_WINDOW_LABEL,
            WebviewUrl::App("index.html".into()),
        )
        .title("InkDraw")
        .decorations(false)
        .resizable(false)
        .shadow(false)
        .skip_taskbar(false)
        .always_on_top(spec.stacking == StackingLevel::ScreenSaver)
        .visible(false)
        .on_page_load(|webview, payload| {
            if payload.event() == PageLoadEvent::Finished {
                dispatch(webview.app_handle(), |_, shell| {
                    shell.content_ready();
                });
            }
        })
        .build()
        .map_err(window_error)?;

        let mut handle = TauriWindow {
            window,
            destroyed: false,
        };
        handle.set_bounds(spec.bounds)?;
        Ok(handle)
    }
}

pub struct TauriWindow {
    window: WebviewWindow,
    destroyed: bool,
}

impl OverlayWindow for TauriWindow {
    fn set_bounds(&mut self, bounds: Rect) -> ShellResult<()> {
        self.window
            .set_position(PhysicalPosition::new(bounds.x, bounds.y))
            .map_err(window_error)?;
        self.window
            .set_size(PhysicalSize::new(bounds.width, bounds.height))
            .map_err(window_error)
    }

    fn set_stacking(&mut self, level: StackingLevel) -> ShellResult<()> {
        self.window
            .set_always_on_top(level == StackingLevel::ScreenSaver)
            .map_err(window_error)
    }

    fn show(&mut self) -> ShellResult<()> {
        self.window.show().map_err(window_error)
    }

    fn hide(&mut self) -> ShellResult<()> {
        self.window.hide().map_err(window_error)
    }

    fn focus(&mut self) -> ShellResult<()> {
        self.window.set_focus().map_err(window_error)
    }

    fn minimize(&mut self) -> ShellResult<()> {
        self.window.minimize().map_err(window_error)
    }

    fn unminimize(&mut self) -> ShellResult<()> {
        self.window.unminimize().map_err(window_error)
    }

    fn is_minimized(&self) -> ShellResult<bool> {
        self.window.is_minimized().map_err(window_error)
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
            || self
                .window
                .app_handle()
                .get_webview_window(MAIN_WINDOW_LABEL)
                .is_none()
    }

    /// Drop the canvas page before the native window goes away.
    fn destroy_content(&mut self) -> ShellResult<()> {
        let blank = tauri::Url::parse("about:blank")
            .map_err(|err| ShellError::Window(err.to_string()))?;
        self.window.navigate(blank).map_err(window_error)
    }

    fn destroy(&mut self) -> ShellResult<()> {
        self.window.destroy().map_err(window_error)?;
        self.destroyed = true;
        Ok(())
    }
}
