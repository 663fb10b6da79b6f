use std::hash::{DefaultHasher, Hash, Hasher};

use inkdraw_core::{Display, DisplaySource, Rect};
use tauri::{AppHandle, Monitor};

pub struct TauriDisplays {
    app: AppHandle,
}

impl TauriDisplays {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl DisplaySource for TauriDisplays {
    fn displays(&self) -> Vec<Display> {
        match self.app.available_monitors() {
            Ok(monitors) => monitors.iter().map(to_display).collect(),
            Err(err) => {
                tracing::warn!(%err, "failed to enumerate monitors");
                Vec::new()
            }
        }
    }
}

fn to_display(monitor: &Monitor) -> Display {
    let position = monitor.position();
    let size = monitor.size();
    let work_area = monitor.work_area();
    Display {
        id: monitor_id(monitor),
        bounds: Rect::new(position.x, position.y, size.width, size.height),
        work_area: Rect::new(
            work_area.position.x,
            work_area.position.y,
            work_area.size.width,
            work_area.size.height,
        ),
    }
}

/// Stable for the monitor's lifetime: derived from its name and origin.
fn monitor_id(monitor: &Monitor) -> u32 {
    let mut hasher = DefaultHasher::new();
    monitor.name().hash(&mut hasher);
    monitor.position().x.hash(&mut hasher);
    monitor.position().y.hash(&mut hasher);
    hasher.finish() as u32
}
