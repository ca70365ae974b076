use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::http::connection::{Connection, Dispatch};

/// Accept loop: one spawned worker per connection. A worker's failure is
/// logged and contained; it never takes the loop or sibling connections
/// down.
pub async fn run<S: Send + Sync + 'static>(
    listener: TcpListener,
    dispatch: Dispatch<S>,
    state: Arc<S>,
    log_enabled: bool,
) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);

    loop {
        let (socket, peer) = listener.accept().await?;
        if log_enabled {
            info!("Accepted connection from {}", peer);
        }

        let dispatch = dispatch.clone();
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, peer, dispatch, state, log_enabled);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
