// Server loop module
// Accepts connections until shutdown, then waits for in-flight ones

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Pause after a failed `accept()` so a persistent error (e.g. EMFILE) does not spin
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Run the accept loop on `listener` until [`AppState::request_shutdown`]
pub async fn run_server(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let mut shutdown = std::pin::pin!(state.shutdown_signal());

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => back_off_after_accept_error(&e).await,
                }
            }

            () = &mut shutdown => break,
        }
    }

    // Stop accepting before draining
    drop(listener);
    drain_connections(&state).await;
    Ok(())
}

async fn back_off_after_accept_error(err: &std::io::Error) {
    logger::log_error(&format!(
        "Failed to accept connection: {err}, retrying in {}ms",
        ACCEPT_ERROR_BACKOFF.as_millis()
    ));
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}

/// Wait up to `performance.shutdown_grace` for active connections to finish
async fn drain_connections(state: &AppState) {
    let grace = Duration::from_secs(state.config.performance.shutdown_grace);
    let active = state.active_connections.load(Ordering::SeqCst);
    logger::log_shutdown_started(active, grace.as_secs());

    let deadline = tokio::time::Instant::now() + grace;
    let mut remaining = active;
    while remaining > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        remaining = state.active_connections.load(Ordering::SeqCst);
    }

    logger::log_shutdown_complete(remaining);
}
