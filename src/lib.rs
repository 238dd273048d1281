//! Minimal static-page HTTP server library.
//!
//! The server binds one listening socket and serves a fixed HTML page to
//! every connection. Each accepted connection gets its own handler task
//! that reads the request once into a bounded buffer and writes back a
//! hand-framed HTTP/1.1 response; finished handlers are collected by a
//! supervisor so they never accumulate.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Reaper;
