//! Process-lifetime components.
//!
//! # Data Flow
//! ```text
//! Accept loop spawns handler task
//!     → reaper.rs watch() (join handle enqueued)
//!     → supervisor task drains completions in completion order
//!     → exit status recorded in shared counters
//! ```
//!
//! # Design Decisions
//! - The reaper is constructed once, before the accept loop starts
//! - Draining never blocks the accept loop

pub mod reaper;

pub use reaper::{HandlerStats, Reaper};
