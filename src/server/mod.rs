// Server module entry point
// Binds the listener and runs the accept loop

pub mod connection;
pub mod listener;

// Rust does not allow `loop` as a module name (keyword)
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::logger;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::start_server_loop;

/// Bind, announce the port and serve until the process is killed.
///
/// Must run inside a `tokio::task::LocalSet`: connections are served by
/// `spawn_local` tasks on the calling thread.
///
/// Returns only on startup failure (bad address, unusable root, bind error).
pub async fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(config)?);
    let addr = config.get_socket_addr()?;
    let listener = create_listener(addr)?;

    logger::log_server_start(addr.port());

    start_server_loop(listener, state).await;
    Ok(())
}
