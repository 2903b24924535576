// Application state module
// Runtime state shared by every connection task

use std::future::Future;
use std::sync::atomic::AtomicUsize;
use tokio::sync::watch;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Connections currently being served
    pub active_connections: AtomicUsize,
    /// Flips to `true` once when the server should stop
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            active_connections: AtomicUsize::new(0),
            shutdown: watch::Sender::new(false),
        }
    }

    pub fn request_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Resolves once [`Self::request_shutdown`] has been called, including
    /// when that happened before this future was created
    pub fn shutdown_signal(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut signal = self.shutdown.subscribe();
        async move {
            let _ = signal.wait_for(|stop| *stop).await;
        }
    }
}
