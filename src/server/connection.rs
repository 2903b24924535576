// Connection handling module
// Accepts a single TCP connection and serves it on its own task

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Decrements the active connection counter when the serving task ends
struct ConnectionGuard(Arc<AppState>);

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.active_connections.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Accept a connection, enforcing `performance.max_connections`.
///
/// Returns `false` when the connection was rejected.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) -> bool {
    // Increment first, then check, so concurrent accepts cannot both slip under the limit
    let prev_count = state.active_connections.fetch_add(1, Ordering::SeqCst);
    let guard = ConnectionGuard(Arc::clone(state));

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return false;
        }
    }

    logger::log_connection_accepted(&peer_addr);
    tokio::spawn(serve_connection(stream, peer_addr, guard));
    true
}

/// Serve HTTP/1.1 on the stream until the client closes it, a shutdown
/// finishes the in-flight request, or `performance.connection_timeout`
/// elapses. The timeout covers the whole connection, not one request.
async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, guard: ConnectionGuard) {
    let state = Arc::clone(&guard.0);
    let performance = &state.config.performance;
    let timeout = Duration::from_secs(performance.connection_timeout);
    let mut shutdown = std::pin::pin!(state.shutdown_signal());

    let mut builder = http1::Builder::new();
    builder.keep_alive(performance.keep_alive);

    let service_state = Arc::clone(&state);
    let mut conn = std::pin::pin!(builder.serve_connection(
        TokioIo::new(stream),
        service_fn(move |req| {
            handler::handle_request(req, Arc::clone(&service_state), Some(peer_addr))
        }),
    ));

    let served = async {
        tokio::select! {
            result = conn.as_mut() => result,
            () = &mut shutdown => {
                conn.as_mut().graceful_shutdown();
                conn.as_mut().await
            }
        }
    };

    match tokio::time::timeout(timeout, served).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => logger::log_warning(&format!(
            "Connection from {peer_addr} timed out after {} seconds",
            timeout.as_secs()
        )),
    }

    drop(guard);
}
