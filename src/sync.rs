//! Synchronization primitives for the chess engine.
//!
//! Provides thread-safe utilities for search control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A thread-safe stop flag for abandoning an in-flight search.
///
/// Each depth iteration gets its own flag so that stopping a detached worker
/// never affects the iteration that replaces it.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Check if the stop flag is set.
    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Set the stop flag.
    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}
