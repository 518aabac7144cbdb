/// Hooks for auditing failures that the scan recovers from silently.
///
/// Observers see every suppressed error but cannot change aggregation:
/// the failing path contributes zero bytes either way.
use crate::error::{ErrorScope, SuppressedError};
use parking_lot::Mutex;

/// Receives suppressed per-path failures. Called concurrently from
/// worker threads.
pub trait ErrorObserver: Send + Sync {
    fn on_suppressed(&self, error: SuppressedError);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ErrorObserver for NoopObserver {
    fn on_suppressed(&self, _error: SuppressedError) {}
}

/// Keeps every suppressed error in memory, up to a cap.
#[derive(Debug)]
pub struct CollectingObserver {
    errors: Mutex<Vec<SuppressedError>>,
    limit: usize,
}

impl CollectingObserver {
    /// Retain at most `limit` errors; later ones are dropped.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            errors: Mutex::new(Vec::new()),
            limit,
        }
    }

    /// Number of errors retained so far.
    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    /// Retained errors in a given scope.
    pub fn count(&self, scope: ErrorScope) -> usize {
        self.errors.lock().iter().filter(|e| e.scope == scope).count()
    }

    /// Drain the retained errors.
    pub fn take(&self) -> Vec<SuppressedError> {
        std::mem::take(&mut *self.errors.lock())
    }
}

impl Default for CollectingObserver {
    fn default() -> Self {
        Self::with_limit(10_000)
    }
}

impl ErrorObserver for CollectingObserver {
    fn on_suppressed(&self, error: SuppressedError) {
        let mut errors = self.errors.lock();
        if errors.len() < self.limit {
            errors.push(error);
        }
    }
}
