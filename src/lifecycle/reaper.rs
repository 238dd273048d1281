//! Reclamation of finished handler tasks.
//!
//! # Responsibilities
//! - Track every spawned handler task
//! - Drain completions without blocking the accept loop
//! - Record exit status (clean return vs panic)
//!
//! # Design Decisions
//! - Explicit supervisor task over a completion channel, constructed once
//!   at server startup
//! - Completions are drained in completion order, not spawn order

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

/// Shared counters describing handler-task turnover.
///
/// Cheap to clone; all clones observe the same counters.
#[derive(Debug, Clone, Default)]
pub struct HandlerStats {
    spawned: Arc<AtomicU64>,
    reaped: Arc<AtomicU64>,
    panicked: Arc<AtomicU64>,
}

impl HandlerStats {
    /// Handlers spawned so far.
    pub fn spawned(&self) -> u64 {
        self.spawned.load(Ordering::SeqCst)
    }

    /// Handlers whose exit status has been collected.
    pub fn reaped(&self) -> u64 {
        self.reaped.load(Ordering::SeqCst)
    }

    /// Handlers that ended in a panic.
    pub fn panicked(&self) -> u64 {
        self.panicked.load(Ordering::SeqCst)
    }

    /// Handlers still running or finished but not yet collected.
    pub fn in_flight(&self) -> u64 {
        // The two loads are not atomic together; a reap can land between
        // them, so saturate instead of underflowing.
        self.spawned().saturating_sub(self.reaped())
    }
}

/// Supervisor that collects finished handler tasks.
///
/// Handlers finish in any order; their join handles are drained here so
/// finished tasks never accumulate unobserved. A handler panic is recorded
/// and contained, it never reaches the accept loop.
#[derive(Debug)]
pub struct Reaper {
    tx: mpsc::UnboundedSender<JoinHandle<()>>,
    stats: HandlerStats,
}

impl Reaper {
    /// Start the supervisor task.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stats = HandlerStats::default();
        tokio::spawn(reap_loop(rx, stats.clone()));

        Self { tx, stats }
    }

    /// Register a handler task for reclamation.
    pub fn watch(&self, handle: JoinHandle<()>) {
        self.stats.spawned.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(handle).is_err() {
            // Only possible while the runtime is tearing down.
            tracing::warn!("Reaper is gone; handler will not be collected");
        }
    }

    /// Shared turnover counters.
    pub fn stats(&self) -> HandlerStats {
        self.stats.clone()
    }
}

async fn reap_loop(mut rx: mpsc::UnboundedReceiver<JoinHandle<()>>, stats: HandlerStats) {
    let mut pending = FuturesUnordered::new();

    loop {
        tokio::select! {
            incoming = rx.recv() => match incoming {
                Some(handle) => pending.push(handle),
                None => break,
            },
            Some(finished) = pending.next() => reap_one(finished, &stats),
        }
    }

    // All senders dropped; collect whatever is still running.
    while let Some(finished) = pending.next().await {
        reap_one(finished, &stats);
    }
}

fn reap_one(finished: Result<(), JoinError>, stats: &HandlerStats) {
    stats.reaped.fetch_add(1, Ordering::SeqCst);
    match finished {
        Ok(()) => tracing::trace!("Handler collected"),
        Err(e) if e.is_panic() => {
            stats.panicked.fetch_add(1, Ordering::SeqCst);
            tracing::error!(error = %e, "Handler panicked");
        }
        Err(e) => tracing::error!(error = %e, "Handler aborted"),
    }
}
