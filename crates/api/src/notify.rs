//! Notification channel stub.
//!
//! A second listener that accepts connections carrying no protocol: connects
//! and disconnects are logged and counted, nothing else. Kept observable so
//! a future protocol can attach here without changing the bootstrap.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

/// Handle over the notification listener.
#[derive(Debug, Clone)]
pub struct NotifyHub {
    connections: Arc<AtomicUsize>,
    local_addr: std::net::SocketAddr,
}

impl NotifyHub {
    /// Bind the listener and start accepting in the background.
    pub async fn bind(addr: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let connections = Arc::new(AtomicUsize::new(0));

        let counter = connections.clone();
        tokio::spawn(async move {
            loop {
                let (mut socket, peer) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!("notification accept failed: {e}");
                        continue;
                    }
                };

                let active = counter.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::info!(%peer, active, "a user connected");

                let counter = counter.clone();
                tokio::spawn(async move {
                    // Drain until EOF; the channel carries no defined protocol.
                    let mut buf = [0u8; 1024];
                    loop {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(_) => {}
                        }
                    }
                    let active = counter.fetch_sub(1, Ordering::SeqCst) - 1;
                    tracing::info!(%peer, active, "a user disconnected");
                });
            }
        });

        Ok(Self {
            connections,
            local_addr,
        })
    }

    /// Number of currently open connections.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn local_addr(&self) -> std::net::SocketAddr {
        self.local_addr
    }
}
