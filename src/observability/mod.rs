//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; no metrics endpoint in this server
//! - Filter configurable through the environment

pub mod logging;
