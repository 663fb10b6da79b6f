//! Tray Icon Loading
//!
//! A custom PNG asset is optional. Anything that goes wrong while reading or
//! decoding it falls back to a small bitmap generated in code.

use std::path::Path;

use crate::error::{ShellError, ShellResult};

const PLACEHOLDER_SIZE: u32 = 16;
const PLACEHOLDER_INK: [u8; 4] = [0x1f, 0x9e, 0x89, 0xff];

/// Decoded RGBA icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayIcon {
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

impl TrayIcon {
    pub fn from_png_bytes(bytes: &[u8]) -> ShellResult<Self> {
        let img = image::load_from_memory(bytes).map_err(|e| ShellError::Tray(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(ShellError::Tray("icon decoded empty".into()));
        }
        Ok(Self {
            rgba: rgba.into_raw(),
            width,
            height,
        })
    }

    pub fn load(path: &Path) -> ShellResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_png_bytes(&bytes)
    }

    pub fn load_or_placeholder(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::placeholder();
        };
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(%err, ?path, "failed to load tray icon; using placeholder");
            Self::placeholder()
        })
    }

    /// A filled ink dot on a transparent background.
    pub fn placeholder() -> Self {
        let size = PLACEHOLDER_SIZE;
        let center = (size as f32 - 1.0) / 2.0;
        let radius = size as f32 / 2.0 - 1.0;
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                if dx * dx + dy * dy <= radius * radius {
                    rgba.extend_from_slice(&PLACEHOLDER_INK);
                } else {
                    rgba.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }
        Self {
            rgba,
            width: size,
            height: size,
        }
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn into_parts(self) -> (Vec<u8>, u32, u32) {
        (self.rgba, self.width, self.height)
    }
}
