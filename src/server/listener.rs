use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind to {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, cfg).await
}

/// Accepts connections from `listener` until accepting fails.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let root: Arc<Path> = Arc::from(cfg.directory.as_path());
    let read_buffer_size = cfg.read_buffer_size;
    info!(directory = %root.display(), "Serving files");

    loop {
        let (socket, peer) = listener
            .accept()
            .await
            .context("error accepting connection")?;
        info!("Accepted connection from {}", peer);

        let root = Arc::clone(&root);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, root, read_buffer_size);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
