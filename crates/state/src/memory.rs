//! In-memory ledger with snapshot reads and optimistic commit validation.
//!
//! Each [`Transaction`] reads from the snapshot taken at [`Ledger::begin`],
//! buffers its writes, and records the version of every key it read (and the
//! keys and versions of every range it scanned). [`Ledger::commit`] applies
//! the writes only if none of those reads went stale in the meantime. Two
//! transactions that both observe a key as absent and both write it cannot
//! both commit.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::StateError;
use crate::scan::{KeyValue, RangeScan, ScanTracker};
use crate::{CommitReceipt, Ledger, WorldState};

/// A committed value and the ledger height that wrote it.
#[derive(Debug, Clone)]
struct Versioned {
    value: Vec<u8>,
    version: u64,
}

type Snapshot = Arc<BTreeMap<String, Versioned>>;

#[derive(Debug, Default)]
struct Committed {
    height: u64,
    state: Snapshot,
}

/// Ordered in-memory key-value ledger.
///
/// Iteration order is lexicographic by key. Intended for tests and local
/// runs: a commit copies the whole map while any open transaction still
/// holds the previous snapshot.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    committed: RwLock<Committed>,
    scans: ScanTracker,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commits that wrote at least one key.
    pub fn height(&self) -> Result<u64, StateError> {
        Ok(self.read_committed()?.height)
    }

    /// Range scans opened by any transaction and not yet released.
    pub fn open_scans(&self) -> usize {
        self.scans.open()
    }

    /// Copy of every committed key and value.
    pub fn entries(&self) -> Result<BTreeMap<String, Vec<u8>>, StateError> {
        let committed = self.read_committed()?;
        Ok(committed
            .state
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect())
    }

    fn read_committed(&self) -> Result<RwLockReadGuard<'_, Committed>, StateError> {
        self.committed
            .read()
            .map_err(|_| StateError::Unavailable("ledger lock poisoned".into()))
    }

    fn write_committed(&self) -> Result<RwLockWriteGuard<'_, Committed>, StateError> {
        self.committed
            .write()
            .map_err(|_| StateError::Unavailable("ledger lock poisoned".into()))
    }
}

impl Ledger for MemoryLedger {
    type Transaction = Transaction;

    fn begin(&self) -> Result<Transaction, StateError> {
        let committed = self.read_committed()?;
        let tx = Transaction {
            tx_id: Uuid::now_v7(),
            base_height: committed.height,
            snapshot: Arc::clone(&committed.state),
            reads: BTreeMap::new(),
            ranges: Vec::new(),
            writes: BTreeMap::new(),
            scans: self.scans.clone(),
        };
        tracing::trace!(tx_id = %tx.tx_id, base_height = tx.base_height, "Transaction started");
        Ok(tx)
    }

    fn commit(&self, tx: Transaction) -> Result<CommitReceipt, StateError> {
        let mut committed = self.write_committed()?;

        for (key, seen) in &tx.reads {
            let current = committed.state.get(key).map(|entry| entry.version);
            if current != *seen {
                tracing::warn!(tx_id = %tx.tx_id, key = %key, "Commit rejected: stale read");
                return Err(StateError::ReadConflict { key: key.clone() });
            }
        }

        for range in &tx.ranges {
            let current = versions_in_range(&committed.state, &range.start, &range.end)?;
            if current != range.versions {
                tracing::warn!(
                    tx_id = %tx.tx_id,
                    start = %range.start,
                    end = %range.end,
                    "Commit rejected: stale range",
                );
                return Err(StateError::StaleRange {
                    start: range.start.clone(),
                    end: range.end.clone(),
                });
            }
        }

        let writes = tx.writes.len();
        if writes == 0 {
            return Ok(CommitReceipt {
                tx_id: tx.tx_id,
                height: committed.height,
                writes,
                committed_at: chrono::Utc::now(),
            });
        }

        let height = committed.height + 1;
        let state = Arc::make_mut(&mut committed.state);
        for (key, write) in tx.writes {
            match write {
                Some(value) => {
                    state.insert(
                        key,
                        Versioned {
                            value,
                            version: height,
                        },
                    );
                }
                None => {
                    state.remove(&key);
                }
            }
        }
        committed.height = height;

        tracing::debug!(tx_id = %tx.tx_id, height, writes, "Transaction committed");

        Ok(CommitReceipt {
            tx_id: tx.tx_id,
            height,
            writes,
            committed_at: chrono::Utc::now(),
        })
    }
}

/// A range read recorded for commit validation.
#[derive(Debug)]
struct RangeRead {
    start: String,
    end: String,
    versions: Vec<(String, u64)>,
}

/// One invocation's view of a [`MemoryLedger`].
///
/// Reads always come from the snapshot taken at `begin`; writes made by the
/// same transaction are not visible to its own reads. Dropping the
/// transaction without committing discards every write.
#[derive(Debug)]
pub struct Transaction {
    tx_id: Uuid,
    base_height: u64,
    snapshot: Snapshot,
    reads: BTreeMap<String, Option<u64>>,
    ranges: Vec<RangeRead>,
    writes: BTreeMap<String, Option<Vec<u8>>>,
    scans: ScanTracker,
}

impl Transaction {
    pub fn id(&self) -> Uuid {
        self.tx_id
    }

    /// Ledger height the snapshot was taken at.
    pub fn base_height(&self) -> u64 {
        self.base_height
    }

    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }
}

impl WorldState for Transaction {
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        let entry = self.snapshot.get(key);
        self.reads
            .entry(key.to_string())
            .or_insert_with(|| entry.map(|e| e.version));
        Ok(entry.map(|e| e.value.clone()))
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StateError> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn scan_range(&mut self, start: &str, end: &str) -> Result<RangeScan, StateError> {
        let bounds = range_bounds(start, end)?;
        let mut versions = Vec::new();
        let mut entries = Vec::new();
        for (key, entry) in self.snapshot.range::<str, _>(bounds) {
            versions.push((key.clone(), entry.version));
            entries.push(Ok(KeyValue {
                key: key.clone(),
                value: entry.value.clone(),
            }));
        }
        self.ranges.push(RangeRead {
            start: start.to_string(),
            end: end.to_string(),
            versions,
        });
        tracing::trace!(tx_id = %self.tx_id, start, end, count = entries.len(), "Range scan opened");
        Ok(RangeScan::tracked(entries, &self.scans))
    }
}

fn validate_key(key: &str) -> Result<(), StateError> {
    if key.is_empty() {
        return Err(StateError::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}

/// Convert scan bounds to a `BTreeMap` range. Empty means unbounded.
fn range_bounds<'a>(
    start: &'a str,
    end: &'a str,
) -> Result<(Bound<&'a str>, Bound<&'a str>), StateError> {
    if !start.is_empty() && !end.is_empty() && start > end {
        return Err(StateError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    Ok((lower, upper))
}

fn versions_in_range(
    state: &BTreeMap<String, Versioned>,
    start: &str,
    end: &str,
) -> Result<Vec<(String, u64)>, StateError> {
    let bounds = range_bounds(start, end)?;
    Ok(state
        .range::<str, _>(bounds)
        .map(|(key, entry)| (key.clone(), entry.version))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
