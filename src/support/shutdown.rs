//! Graceful shutdown plumbing.
//!
//! One broadcast channel fans the stop signal out to the API server and
//! the pending-expiry sweeper. Triggering is idempotent: only the first
//! call fires, later ones are no-ops, and late subscribers still observe
//! a signal that already fired.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::info;

/// Cloneable stop signal shared by every long-running task.
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Fire the signal once.
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            info!("🛑 Shutdown signal triggered");
            let _ = self.sender.send(());
        }
    }

    /// Resolve once the signal fires, or right away if it already has.
    pub async fn wait(&self) {
        // Subscribe before the triggered check so a trigger landing in
        // between is not missed
        let mut rx = self.sender.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }

    /// A one-shot future for `tokio::select!` arms.
    pub fn notified(&self) -> ShutdownNotified {
        ShutdownNotified {
            receiver: self.sender.subscribe(),
            triggered: self.triggered.clone(),
        }
    }
}

/// A future that resolves when shutdown is triggered
pub struct ShutdownNotified {
    receiver: broadcast::Receiver<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownNotified {
    pub async fn wait(mut self) {
        if self.triggered.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.receiver.recv().await;
    }
}

/// Listen for OS shutdown signals (SIGTERM, SIGINT) and fire `shutdown`.
pub async fn listen_for_shutdown_signals(shutdown: ShutdownSignal) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("📡 Received SIGTERM signal");
            }
            _ = sigint.recv() => {
                info!("📡 Received SIGINT signal (Ctrl+C)");
            }
        }

        shutdown.trigger();
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("📡 Received Ctrl+C signal");
        shutdown.trigger();
    }
}

/// Owns the shared signal and the drain deadline for server teardown.
pub struct ShutdownCoordinator {
    signal: ShutdownSignal,
    timeout_secs: u64,
}

impl ShutdownCoordinator {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            signal: ShutdownSignal::new(),
            timeout_secs,
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    /// How long server teardown may wait for in-flight work to drain.
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn start_signal_listener(&self) {
        let signal = self.signal.clone();
        tokio::spawn(async move {
            listen_for_shutdown_signals(signal).await;
        });
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_resolves_after_trigger() {
        let signal = ShutdownSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };
        signal.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait resolved")
            .expect("task join");
    }

    #[tokio::test]
    async fn late_waiters_see_a_fired_signal() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        assert!(signal.is_triggered());

        // Both wait flavours resolve immediately when subscribed after
        // the trigger
        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .expect("wait resolved");
        tokio::time::timeout(Duration::from_secs(1), signal.notified().wait())
            .await
            .expect("notified resolved");
    }

    #[tokio::test]
    async fn trigger_is_idempotent() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.trigger();
        assert!(signal.is_triggered());
    }

    #[test]
    fn coordinator_exposes_drain_timeout() {
        let coordinator = ShutdownCoordinator::new(15);
        assert_eq!(coordinator.drain_timeout(), Duration::from_secs(15));
        assert!(!coordinator.signal().is_triggered());
    }
}
