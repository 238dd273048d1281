//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use minihttpd::config::ServerConfig;
use minihttpd::http::HttpServer;
use minihttpd::lifecycle::HandlerStats;

/// Bind a server on an ephemeral port, run it in the background, and
/// return where it listens plus its handler counters.
pub async fn spawn_server() -> (SocketAddr, HandlerStats) {
    let mut config = ServerConfig::default();
    config.listener.port = "0".to_string();

    let server = HttpServer::bind(&config).await.expect("bind server");
    let addr = SocketAddr::from(([127, 0, 0, 1], server.local_addr().port()));
    let stats = server.handler_stats();

    tokio::spawn(async move {
        server.run().await;
    });

    // Give the accept loop a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, stats)
}

/// Send `request` and return the full raw response, read to EOF.
pub async fn roundtrip(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.write_all(request).await.expect("send request");

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("read response");
    response
}
