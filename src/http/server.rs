//! Accept loop and per-connection request handling.
//!
//! # Responsibilities
//! - Run the accept loop on the bound listener
//! - Spawn one handler task per accepted connection
//! - Hand every handler to the reaper for reclamation
//! - Serve the fixed home page to every request

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::config::ServerConfig;
use crate::http::response;
use crate::lifecycle::reaper::{HandlerStats, Reaper};
use crate::net::connection::Connection;
use crate::net::listener::{Listener, ListenerError};

/// Request bytes read per connection, in a single attempt. A request
/// larger than this (or arriving in later segments) is never seen.
const REQUEST_BUFFER_SIZE: usize = 30720;

/// The page served to every client.
pub const HOME_PAGE: &str = "<!DOCTYPE html><html lang=\"en\"><body><h1> HOME </h1><p> Hello from your Server :) </p></body></html>";

/// HTTP server owning the bound socket and the handler reaper.
pub struct HttpServer {
    listener: Listener,
    reaper: Reaper,
}

impl HttpServer {
    /// Bind the listener and install reclamation, in that order, before
    /// any connection is accepted.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ListenerError> {
        let listener = Listener::bind(&config.listener).await?;
        let reaper = Reaper::spawn();

        Ok(Self { listener, reaper })
    }

    /// Get the local address of the bound listener.
    pub fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    /// Counters for spawned and reaped handler tasks.
    pub fn handler_stats(&self) -> HandlerStats {
        self.reaper.stats()
    }

    /// Accept connections forever, one handler task per connection.
    ///
    /// Accept failures are logged and the loop continues; nothing a single
    /// connection does can take the server down.
    pub async fn run(self) {
        tracing::info!("Waiting for connections");

        loop {
            let connection = match self.listener.accept().await {
                Ok(connection) => connection,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to accept");
                    continue;
                }
            };

            tracing::info!(
                connection_id = %connection.id(),
                peer = %connection.peer(),
                "Got connection"
            );

            // The stream moves wholly into the task; the accept loop keeps
            // no handle to it.
            let handle = tokio::spawn(handle_connection(connection));
            self.reaper.watch(handle);
        }
    }
}

/// One connection's full request/response cycle.
///
/// The connection closes when this task returns, on every path. A peer
/// that sends nothing parks this task indefinitely; no timeout is applied.
async fn handle_connection(mut connection: Connection) {
    let id = connection.id();
    let peer = connection.peer();

    let mut buffer = vec![0u8; REQUEST_BUFFER_SIZE];
    let received = match connection.stream_mut().read(&mut buffer).await {
        Ok(received) => received,
        Err(e) => {
            tracing::error!(
                connection_id = %id,
                peer = %peer,
                error = %e,
                "Failed to read incoming request"
            );
            return;
        }
    };

    // The request is logged, never parsed. EOF counts as an empty request
    // and still gets the page.
    tracing::trace!(
        connection_id = %id,
        bytes = received,
        request = %String::from_utf8_lossy(&buffer[..received]),
        "Request received"
    );

    let response = response::build(HOME_PAGE);
    match connection.stream_mut().write(response.as_bytes()).await {
        Ok(written) if written < response.len() => {
            tracing::warn!(
                connection_id = %id,
                written,
                expected = response.len(),
                "Short write"
            );
        }
        Ok(written) => {
            tracing::debug!(connection_id = %id, bytes = written, "Response sent");
        }
        Err(e) => {
            tracing::error!(
                connection_id = %id,
                peer = %peer,
                error = %e,
                "Failed to write response"
            );
        }
    }
}
