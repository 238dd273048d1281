//! Minimal static-page HTTP server.
//!
//! Binds the configured port and serves the same HTML page to every
//! connection. Request bytes are read once into a bounded buffer and
//! never parsed.

use std::path::PathBuf;

use clap::Parser;

use minihttpd::config::loader::load_config;
use minihttpd::config::ServerConfig;
use minihttpd::http::HttpServer;
use minihttpd::observability;

#[derive(Parser)]
#[command(name = "minihttpd", about = "Serve a fixed HTML page over HTTP/1.1", long_about = None)]
struct Cli {
    /// Port to listen on; overrides the config file.
    port: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    tracing::info!(port = %config.listener.port, "minihttpd starting");

    // Startup errors (resolution, socket options, no bindable candidate)
    // are fatal and exit nonzero; everything after this point is
    // per-connection and survivable.
    let server = HttpServer::bind(&config).await?;
    server.run().await;

    Ok(())
}
