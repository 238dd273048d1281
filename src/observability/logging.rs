//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Keep the default filter focused on this crate

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// The filter comes from the environment when set, otherwise defaults to
/// info-level output for this crate.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minihttpd=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
