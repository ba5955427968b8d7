//! Range-scan iterator with deterministic release.
//!
//! A [`RangeScan`] holds backend resources until it is dropped or
//! [`closed`](RangeScan::close). Because release happens in `Drop`, an early
//! `?` return from a consuming loop frees the scan just like normal
//! exhaustion does.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::StateError;

/// One entry yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Counts scans that have been opened but not yet released.
#[derive(Debug, Clone, Default)]
pub struct ScanTracker {
    open: Arc<AtomicUsize>,
}

impl ScanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scans currently open.
    pub fn open(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Arc<AtomicUsize> {
        self.open.fetch_add(1, Ordering::SeqCst);
        Arc::clone(&self.open)
    }
}

/// Iterator over `(key, value)` pairs in backend order.
pub struct RangeScan {
    entries: std::vec::IntoIter<Result<KeyValue, StateError>>,
    consumed: usize,
    guard: Option<Arc<AtomicUsize>>,
}

impl RangeScan {
    /// An untracked scan over already-materialized entries.
    pub fn new(entries: Vec<Result<KeyValue, StateError>>) -> Self {
        Self {
            entries: entries.into_iter(),
            consumed: 0,
            guard: None,
        }
    }

    /// A scan that counts itself open in `tracker` until released.
    pub fn tracked(entries: Vec<Result<KeyValue, StateError>>, tracker: &ScanTracker) -> Self {
        Self {
            entries: entries.into_iter(),
            consumed: 0,
            guard: Some(tracker.acquire()),
        }
    }

    /// Release the scan now instead of at end of scope.
    pub fn close(self) {
        drop(self);
    }
}

impl Iterator for RangeScan {
    type Item = Result<KeyValue, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.entries.next()?;
        self.consumed += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl Drop for RangeScan {
    fn drop(&mut self) {
        if let Some(open) = self.guard.take() {
            open.fetch_sub(1, Ordering::SeqCst);
            tracing::trace!(consumed = self.consumed, "Range scan released");
        }
    }
}

impl std::fmt::Debug for RangeScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeScan")
            .field("remaining", &self.entries.len())
            .field("consumed", &self.consumed)
            .field("tracked", &self.guard.is_some())
            .finish()
    }
}
