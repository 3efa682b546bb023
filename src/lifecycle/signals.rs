//! OS signal handling.

use std::future::Future;
use std::io;

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C, then broadcast shutdown to every subscriber.
pub async fn shutdown_on_ctrl_c(shutdown: &Shutdown) {
    shutdown_on_signal(tokio::signal::ctrl_c(), "Ctrl+C", shutdown).await;
}

/// Trigger `shutdown` once `signal` resolves.
///
/// If the handler cannot be installed the server keeps running and only an
/// error is logged.
pub async fn shutdown_on_signal<F>(signal: F, name: &str, shutdown: &Shutdown)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(signal = name, error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!(signal = name, "Shutdown signal received");
    shutdown.trigger();
}
