// Server loop module
// Accepts connections until the process is killed

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections forever.
///
/// Accept errors (e.g. file descriptor exhaustion) are logged and the loop
/// keeps going; nothing here ends the server.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
            Err(e) => logger::log_accept_error(&e),
        }
    }
}
