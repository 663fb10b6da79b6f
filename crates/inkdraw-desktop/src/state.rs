use std::sync::{Mutex, PoisonError, TryLockError};

use inkdraw_core::LifecycleCoordinator;
use tauri::{AppHandle, Manager};

use crate::platform::TauriPlatform;

pub type Shell = LifecycleCoordinator<TauriPlatform>;

/// Managed state: the one coordinator instance for the process.
pub struct AppState {
    shell: Mutex<Shell>,
}

impl AppState {
    pub fn new(shell: Shell) -> Self {
        Self {
            shell: Mutex::new(shell),
        }
    }

    /// Run `f` against the coordinator, waiting for the lock.
    ///
    /// Only call from synchronous commands and main-thread dispatch; event
    /// callbacks that may fire re-entrantly go through [`dispatch`].
    pub fn with_shell<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Shell) -> R,
    {
        let mut shell = self.shell.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut shell)
    }

    /// Like [`Self::with_shell`] but returns `None` instead of waiting when
    /// the coordinator is mid-transition.
    pub fn try_with_shell<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Shell) -> R,
    {
        match self.shell.try_lock() {
            Ok(mut shell) => Some(f(&mut shell)),
            Err(TryLockError::Poisoned(poisoned)) => Some(f(&mut poisoned.into_inner())),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

/// Queue a transition on the main thread, after the current handler finishes.
///
/// Platform callbacks (tray, shortcuts, window events, signals) can fire while
/// a command holds the coordinator, so they never lock in place.
pub fn dispatch<F>(app: &AppHandle, f: F)
where
    F: FnOnce(&AppHandle, &mut Shell) + Send + 'static,
{
    let handle = app.clone();
    let queued = app.run_on_main_thread(move || {
        if let Some(state) = handle.try_state::<AppState>() {
            state.with_shell(|shell| f(&handle, shell));
        }
    });
    if let Err(err) = queued {
        tracing::warn!(%err, "failed to queue shell transition");
    }
}
