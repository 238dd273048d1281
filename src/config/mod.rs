//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → ServerConfig (immutable)
//!     → CLI port argument overrides the listener port
//!     → handed to HttpServer::bind
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so the server runs with no file at all

pub mod loader;
pub mod schema;

pub use schema::ListenerConfig;
pub use schema::ServerConfig;
