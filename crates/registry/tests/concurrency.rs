//! Tests for racing invocations against one ledger.
//!
//! The registry itself is single-threaded per invocation; these tests check
//! that the ledger's commit validation keeps duplicate creates and stale
//! updates from both landing.

mod common;

use std::sync::Barrier;

use assert_matches::assert_matches;
use assetledger_core::error::ErrorKind;
use assetledger_registry::invoke::submit;
use assetledger_registry::{AssetRegistry, Invocation, RegistryError};
use assetledger_state::{Ledger, MemoryLedger, StateError};
use common::{admin, auditor, read_as, seed_asset, ALICE_ID, BOB_ID};

#[test]
fn interleaved_creates_on_same_id_let_exactly_one_win() {
    let ledger = MemoryLedger::new();
    let registry = AssetRegistry::default();
    let caller = admin();

    let mut first = ledger.begin().unwrap();
    let mut second = ledger.begin().unwrap();

    registry
        .create_asset(&mut Invocation::new(&caller, &mut first), "a1", ALICE_ID, 1)
        .unwrap();
    registry
        .create_asset(&mut Invocation::new(&caller, &mut second), "a1", BOB_ID, 2)
        .unwrap();

    ledger.commit(first).unwrap();
    let err = RegistryError::from(ledger.commit(second).unwrap_err());

    assert_matches!(err, RegistryError::State(StateError::ReadConflict { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(read_as(&ledger, &registry, &auditor(), "a1").unwrap().owner, ALICE_ID);
}

#[test]
fn threaded_creates_on_same_id_let_at_most_one_win() {
    const THREADS: usize = 8;
    let ledger = MemoryLedger::new();
    let registry = AssetRegistry::default();
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let ledger = &ledger;
                let registry = &registry;
                let barrier = &barrier;
                scope.spawn(move || {
                    let caller = admin();
                    barrier.wait();
                    submit(ledger, &caller, |inv| {
                        registry.create_asset(inv, "contested", &format!("owner-{i}"), i as i64)
                    })
                    .map(|submitted| submitted.output)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    for loser in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(loser.kind(), ErrorKind::Conflict);
    }

    let stored = read_as(&ledger, &registry, &auditor(), "contested").unwrap();
    assert_eq!(&stored, winners[0]);
    assert_eq!(ledger.height().unwrap(), 1);
}

#[test]
fn stale_update_is_rejected() {
    let ledger = MemoryLedger::new();
    let registry = AssetRegistry::default();
    seed_asset(&ledger, "a1", ALICE_ID, 100);
    let caller = admin();

    let mut slow = ledger.begin().unwrap();
    registry
        .update_asset(&mut Invocation::new(&caller, &mut slow), "a1", 1)
        .unwrap();

    submit(&ledger, &caller, |inv| registry.update_asset(inv, "a1", 2)).unwrap();

    let err = RegistryError::from(ledger.commit(slow).unwrap_err());
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(read_as(&ledger, &registry, &auditor(), "a1").unwrap().value, 2);
}

#[test]
fn failed_invocation_leaves_no_partial_writes() {
    let ledger = MemoryLedger::new();
    let registry = AssetRegistry::default();
    seed_asset(&ledger, "a1", ALICE_ID, 100);
    let before = ledger.entries().unwrap();

    let err = submit(&ledger, &admin(), |inv| {
        registry.create_asset(inv, "a2", ALICE_ID, 5)?;
        registry.update_asset(inv, "a1", 999)?;
        registry.delete_asset(inv, "missing")
    })
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(ledger.entries().unwrap(), before);
}
