//! TCP listener setup and accept.
//!
//! # Responsibilities
//! - Resolve candidate addresses for the configured port
//! - Bind the first usable candidate, SO_REUSEADDR set beforehand
//! - Accept incoming TCP connections
//! - Graceful handling of accept errors

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;
use crate::net::connection::Connection;
use crate::net::resolver::{self, ResolveError};

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Candidate address resolution failed.
    #[error("failed to resolve bind candidates: {0}")]
    Resolve(#[from] ResolveError),

    /// SO_REUSEADDR could not be set on a candidate socket.
    #[error("failed to set SO_REUSEADDR: {0}")]
    SocketOption(std::io::Error),

    /// No candidate address could be bound.
    #[error("could not bind any candidate address")]
    NoUsableAddress,

    /// The bound socket could not start listening.
    #[error("failed to listen: {0}")]
    Listen(std::io::Error),

    /// Failed to accept a connection.
    #[error("failed to accept: {0}")]
    Accept(std::io::Error),
}

/// The server's single bound listening socket.
///
/// Exclusively owned by the accept loop; dropped on shutdown.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    /// Resolve candidates for the configured port and bind the first one
    /// that takes a bind.
    ///
    /// A candidate whose socket cannot be created or bound is skipped; a
    /// candidate where SO_REUSEADDR cannot be set aborts startup.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let candidates = resolver::resolve_candidates(&config.port).await?;

        let mut bound = None;
        for candidate in candidates {
            let socket = match Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)) {
                Ok(socket) => socket,
                Err(e) => {
                    tracing::warn!(address = %candidate, error = %e, "Failed to create socket");
                    continue;
                }
            };

            // A previous listener in TIME_WAIT would otherwise block rebinding.
            socket
                .set_reuse_address(true)
                .map_err(ListenerError::SocketOption)?;

            if let Err(e) = socket.bind(&candidate.into()) {
                tracing::warn!(address = %candidate, error = %e, "Failed to bind candidate");
                continue;
            }

            bound = Some(socket);
            break;
        }

        let socket = bound.ok_or(ListenerError::NoUsableAddress)?;
        socket
            .listen(config.backlog as i32)
            .map_err(ListenerError::Listen)?;
        socket.set_nonblocking(true).map_err(ListenerError::Listen)?;

        let inner = TcpListener::from_std(socket.into()).map_err(ListenerError::Listen)?;
        let local_addr = inner.local_addr().map_err(ListenerError::Listen)?;

        tracing::info!(
            address = %local_addr,
            backlog = config.backlog,
            "Listener bound"
        );

        Ok(Self { inner, local_addr })
    }

    /// Accept one connection.
    pub async fn accept(&self) -> Result<Connection, ListenerError> {
        let (stream, peer) = self.inner.accept().await.map_err(ListenerError::Accept)?;
        Ok(Connection::new(stream, peer))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}
