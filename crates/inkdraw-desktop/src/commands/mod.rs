//! Tauri Command Handlers
//!
//! Commands invoked by the canvas, grouped by domain. All of them are
//! synchronous, so Tauri runs them on the main thread one at a time.

mod shortcuts;
mod system;
mod window;

pub use shortcuts::*;
pub use system::*;
pub use window::*;
