//! Address resolution.
//!
//! # Responsibilities
//! - Produce bindable IPv4 candidate addresses for a service port
//! - Resolve hostnames to IPv4 addresses for the lookup utility

use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;
use tokio::net::lookup_host;

/// Errors from address resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The port string is not a TCP port number.
    #[error("invalid port {0:?}: {1}")]
    InvalidPort(String, std::num::ParseIntError),

    /// The system resolver failed; carries its diagnostic.
    #[error("address lookup failed: {0}")]
    Lookup(#[from] std::io::Error),
}

/// Resolve the local IPv4 addresses a listener on `port` could bind.
///
/// Candidates come back in resolver-provided order; the caller tries them
/// in that order until one binds.
pub async fn resolve_candidates(port: &str) -> Result<Vec<SocketAddr>, ResolveError> {
    let port: u16 = port
        .parse()
        .map_err(|e| ResolveError::InvalidPort(port.to_string(), e))?;

    let addrs = lookup_host((Ipv4Addr::UNSPECIFIED, port)).await?;
    Ok(addrs.filter(SocketAddr::is_ipv4).collect())
}

/// Resolve `host` to all of its IPv4 addresses.
pub async fn lookup_ipv4(host: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
    let addrs = lookup_host((host, 0)).await?;
    Ok(addrs
        .filter_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
        .collect())
}
