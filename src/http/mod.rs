//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! Accepted connection
//!     → server.rs (spawn handler, single bounded read, no parsing)
//!     → response.rs (frame the fixed page as an HTTP/1.1 response)
//!     → single write back to the peer, then close
//! ```

pub mod response;
pub mod server;

pub use server::{HttpServer, HOME_PAGE};
