//! Display enumeration.
//!
//! Descriptors are produced fresh on every query so a topology change (a
//! monitor plugged in or removed) is always reflected.

use serde::Serialize;

use crate::geometry::Rect;

/// Raw display geometry as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub id: u32,
    pub bounds: Rect,
    pub work_area: Rect,
}

/// Source of the currently connected displays, in platform enumeration order.
pub trait DisplaySource {
    fn displays(&self) -> Vec<Display>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDescriptor {
    pub id: u32,
    pub label: String,
    pub bounds: Rect,
    pub work_area: Rect,
    pub is_primary: bool,
}

impl ScreenDescriptor {
    fn from_display(index: usize, display: Display) -> Self {
        Self {
            id: display.id,
            label: format!(
                "Monitor {} ({}x{})",
                index + 1,
                display.bounds.width,
                display.bounds.height
            ),
            is_primary: display.bounds.is_at_origin(),
            bounds: display.bounds,
            work_area: display.work_area,
        }
    }
}

pub struct ScreenCatalog<D> {
    source: D,
}

impl<D: DisplaySource> ScreenCatalog<D> {
    pub fn new(source: D) -> Self {
        Self { source }
    }

    pub fn list_screens(&self) -> Vec<ScreenDescriptor> {
        self.source
            .displays()
            .into_iter()
            .enumerate()
            .map(|(index, display)| ScreenDescriptor::from_display(index, display))
            .collect()
    }

    pub fn find_screen(&self, id: u32) -> Option<ScreenDescriptor> {
        self.list_screens().into_iter().find(|screen| screen.id == id)
    }

    /// The display at the origin, or the first one if none sits there.
    pub fn primary_screen(&self) -> Option<ScreenDescriptor> {
        let screens = self.list_screens();
        let primary = screens.iter().position(|screen| screen.is_primary);
        screens.into_iter().nth(primary.unwrap_or(0))
    }
}
