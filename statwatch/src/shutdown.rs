//! Signal handling for orderly termination of the poll loop

use tokio::sync::watch;
use tracing::{error, info};

/// What asked the process to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Ctrl+C
    Interrupt,
    /// SIGTERM
    Terminate,
}

/// Register signal handlers and return the stop flag for the poll loop.
///
/// The flag flips to `true` on the first Ctrl+C or SIGTERM.
pub fn listen() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);

    let tx_ctrl_c = tx.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => request_stop(&tx_ctrl_c, ShutdownSignal::Interrupt),
            Err(e) => error!("Failed to register Ctrl+C handler: {}", e),
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    if sigterm.recv().await.is_some() {
                        request_stop(&tx, ShutdownSignal::Terminate);
                    }
                }
                Err(e) => {
                    error!("Failed to register SIGTERM handler: {}", e);
                    // Keep the sender alive so the loop is only stopped by Ctrl+C
                    std::future::pending::<()>().await;
                }
            }
        });
    }

    rx
}

/// Flip the stop flag, logging the first request only
pub fn request_stop(tx: &watch::Sender<bool>, signal: ShutdownSignal) {
    let first = tx.send_if_modified(|stopped| {
        let was_running = !*stopped;
        *stopped = true;
        was_running
    });
    if first {
        info!("Shutdown requested: {:?}", signal);
    }
}
