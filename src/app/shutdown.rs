//! Graceful shutdown handling.

use log::warn;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels `run` on Ctrl-C.
///
/// Cancellation stops the dispatcher from reading further input; domains
/// already queued are still inspected and written. Abort the returned handle
/// once the run is over.
pub fn spawn_interrupt_watcher(run: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing queued domains");
            run.cancel();
        }
    })
}

/// Shuts down background tasks.
///
/// Signals the progress logger to stop and awaits it.
pub async fn shutdown_gracefully(cancel: CancellationToken, progress_task: Option<JoinHandle<()>>) {
    cancel.cancel();
    if let Some(progress_task) = progress_task {
        let _ = progress_task.await;
    }
}
