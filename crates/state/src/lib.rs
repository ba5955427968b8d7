//! World-state contract for the asset registry, plus an in-memory ledger.
//!
//! [`WorldState`] is the per-invocation view the registry reads and writes.
//! [`Ledger`] is the host side: it hands out transactions and commits them.
//! [`MemoryLedger`] implements both with snapshot reads and commit-time
//! read-set validation.

pub mod error;
pub mod memory;
pub mod scan;

pub use error::StateError;
pub use memory::{MemoryLedger, Transaction};
pub use scan::{KeyValue, RangeScan, ScanTracker};

use assetledger_core::types::Timestamp;
use uuid::Uuid;

/// Key-value view of the ledger inside one invocation.
///
/// Methods take `&mut self` because implementations record what was read
/// for commit-time validation.
pub trait WorldState {
    /// Current value at `key`, or `None` if absent.
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Write `value` at `key`.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError>;

    /// Remove `key`.
    fn delete(&mut self, key: &str) -> Result<(), StateError>;

    /// Iterate keys in `[start, end)`. An empty bound is unbounded on that
    /// side, so `scan_range("", "")` covers the whole key space.
    fn scan_range(&mut self, start: &str, end: &str) -> Result<RangeScan, StateError>;
}

/// The host ledger that orders and commits invocations.
pub trait Ledger {
    type Transaction: WorldState;

    /// Start a transaction against the latest committed state.
    fn begin(&self) -> Result<Self::Transaction, StateError>;

    /// Validate and apply a transaction. On error nothing is applied.
    fn commit(&self, tx: Self::Transaction) -> Result<CommitReceipt, StateError>;
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub tx_id: Uuid,
    /// Ledger height after the commit.
    pub height: u64,
    /// Number of keys written or deleted.
    pub writes: usize,
    pub committed_at: Timestamp,
}
