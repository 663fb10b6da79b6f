//! Process-level shutdown triggers: termination signals and panics.

use std::time::Duration;

use tauri::{AppHandle, Manager};

use crate::state::{AppState, dispatch};

/// Delay between signal-triggered teardown and process exit.
const EXIT_GRACE: Duration = Duration::from_millis(150);

/// Run the quit path on SIGINT/SIGTERM, then exit.
pub fn spawn_listener(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let signal = wait_for_signal().await;
        tracing::info!(signal, "termination signal received");
        dispatch(&app, |_, shell| {
            shell.quit();
        });
        tokio::time::sleep(EXIT_GRACE).await;
        app.exit(0);
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(err) => {
            tracing::warn!(%err, "SIGTERM handler unavailable");
            let _ = tokio::signal::ctrl_c().await;
            return "SIGINT";
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "CTRL_C"
}

/// Log the panic, release shell resources if the coordinator is free, and
/// exit with status 1.
pub fn install_panic_hook(app: AppHandle) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_hook(info);
        tracing::error!(%info, "unrecoverable panic");

        let released = app
            .try_state::<AppState>()
            .and_then(|state| state.try_with_shell(|shell| shell.quit()));
        if released.is_none() {
            tracing::warn!("shell busy during panic; skipping teardown");
        }
        std::process::exit(1);
    }));
}
