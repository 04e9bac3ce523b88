//! Signal-driven Shutdown Coordination
//!
//! Turns SIGINT/SIGTERM (or Ctrl-C on other platforms) into a broadcast the
//! application can select on. The first signal asks for a graceful stop; a second
//! one exits the process immediately with status 130.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Exit status used when a second signal forces termination
pub const FORCED_EXIT_CODE: i32 = 130;

/// Coordinates graceful shutdown across the application
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator and its first receiver
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);
        let coordinator = Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, shutdown_rx)
    }

    /// Subscribe to shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Request shutdown programmatically
    pub fn trigger_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    /// Check if shutdown has been requested
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Run `future_fn` with signal handlers installed
    ///
    /// The closure receives a broadcast receiver that fires on the first signal.
    pub async fn guard<F, Fut, R, E>(future_fn: F) -> Result<R, E>
    where
        F: FnOnce(broadcast::Receiver<()>) -> Fut,
        Fut: std::future::Future<Output = Result<R, E>>,
    {
        let (coordinator, shutdown_rx) = Self::new();
        coordinator.install_signal_handlers();
        future_fn(shutdown_rx).await
    }

    fn install_signal_handlers(&self) {
        let signal_count = Arc::new(AtomicUsize::new(0));

        #[cfg(unix)]
        {
            // Default SIGPIPE so `vecscan ... | head` ends quietly
            unsafe {
                libc::signal(libc::SIGPIPE, libc::SIG_DFL);
            }

            use tokio::signal::unix::{signal, SignalKind};
            for kind in [
                SignalKind::interrupt(),
                SignalKind::terminate(),
                SignalKind::hangup(),
            ] {
                let tx = self.shutdown_tx.clone();
                let requested = self.shutdown_requested.clone();
                let count = signal_count.clone();

                tokio::spawn(async move {
                    if let Ok(mut sig) = signal(kind) {
                        while sig.recv().await.is_some() {
                            on_signal(&tx, &requested, &count);
                        }
                    }
                });
            }
        }

        #[cfg(not(unix))]
        {
            let tx = self.shutdown_tx.clone();
            let requested = self.shutdown_requested.clone();
            tokio::spawn(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    on_signal(&tx, &requested, &signal_count);
                }
            });
        }
    }
}

fn on_signal(tx: &broadcast::Sender<()>, requested: &AtomicBool, count: &AtomicUsize) {
    let previous = count.fetch_add(1, Ordering::AcqRel);
    requested.store(true, Ordering::Release);
    if previous >= 1 {
        log::warn!("Second signal received; exiting");
        std::process::exit(FORCED_EXIT_CODE);
    }
    log::warn!("Signal received; stopping scan (send again to exit immediately)");
    let _ = tx.send(());
}
