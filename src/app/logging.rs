//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Logs progress information about domain inspection.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed` - Atomic counter of domains whose result has been written
pub fn log_progress(start_time: std::time::Instant, completed: &Arc<AtomicUsize>) {
    let elapsed = start_time.elapsed();
    let completed = completed.load(Ordering::SeqCst);
    let elapsed_secs = elapsed.as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {} domains in {:.2} seconds (~{:.2} domains/sec)",
        completed, elapsed_secs, rate
    );
}

/// Spawns a task that calls [`log_progress`] every `interval` until `cancel` fires.
pub fn spawn_progress_logger(
    start_time: std::time::Instant,
    completed: Arc<AtomicUsize>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => log_progress(start_time, &completed),
            }
        }
    })
}
