use thiserror::Error;

pub type ShellResult<T> = std::result::Result<T, ShellError>;

/// Failures reported by platform backends and the config store.
///
/// None of these are fatal to the shell: the coordinator turns them into
/// boolean outcomes, reports, or log events.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("window operation failed: {0}")]
    Window(String),

    #[error("tray operation failed: {0}")]
    Tray(String),

    #[error("shortcut registration failed for {accelerator}: {reason}")]
    Shortcut { accelerator: String, reason: String },

    #[error("invalid accelerator: {0}")]
    InvalidAccelerator(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
