//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured port
//!     → resolver.rs (candidate local addresses, in resolver order)
//!     → listener.rs (bind first usable candidate, accept loop source)
//!     → connection.rs (owned per-connection handle)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - SO_REUSEADDR is set before bind on every candidate
//! - A bind failure moves on to the next candidate; option failures abort
//! - Exactly one bound socket per server instance

pub mod connection;
pub mod listener;
pub mod resolver;

pub use connection::{Connection, ConnectionId};
pub use listener::{Listener, ListenerError};
