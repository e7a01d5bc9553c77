use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::config::Config;
use crate::protocol::Dispatcher;
use crate::registry::Registry;
use crate::server::connection::Connection;

/// Bound listening socket plus the state every connection shares.
///
/// The socket is closed when this value is dropped, whichever way
/// [`Listener::serve`] exits.
pub struct Listener {
    listener: TcpListener,
    dispatcher: Dispatcher,
    buffer_size: usize,
}

impl Listener {
    pub async fn bind(cfg: &Config, registry: Arc<Registry>) -> anyhow::Result<Self> {
        let addr = tokio::net::lookup_host(&cfg.listen_addr)
            .await
            .with_context(|| format!("Failed to resolve {}", cfg.listen_addr))?
            .next()
            .with_context(|| format!("No address found for {}", cfg.listen_addr))?;

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        // Sockets closed by `close` linger in TIME_WAIT; without this a
        // restart on the same port fails until they expire.
        socket.set_reuseaddr(true)?;
        socket
            .bind(addr)
            .with_context(|| format!("Failed to bind {}", addr))?;
        let listener = socket
            .listen(cfg.backlog)
            .with_context(|| format!("Failed to listen on {}", addr))?;

        Ok(Self {
            listener,
            dispatcher: Dispatcher::new(registry),
            buffer_size: cfg.buffer_size,
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever, one task per connection.
    pub async fn serve(self) -> anyhow::Result<()> {
        info!("Listening on {}", self.local_addr()?);

        loop {
            let (socket, peer) = self.listener.accept().await?;
            info!("Accepted connection from {}", peer);

            let dispatcher = self.dispatcher.clone();
            let buffer_size = self.buffer_size;
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, peer, dispatcher, buffer_size);
                match conn.run().await {
                    Ok(()) => info!("Connection from {} closed", peer),
                    Err(e) => warn!("Connection error from {}: {}", peer, e),
                }
            });
        }
    }
}

/// Bind according to `cfg` and serve a fresh, empty registry.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let registry = Arc::new(Registry::new());
    Listener::bind(cfg, registry).await?.serve().await
}
