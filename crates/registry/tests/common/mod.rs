#![allow(dead_code)]

use assetledger_core::asset::Asset;
use assetledger_core::identity::CallerIdentity;
use assetledger_registry::invoke::{evaluate, submit};
use assetledger_registry::{AssetRegistry, RegistryResult};
use assetledger_state::{KeyValue, Ledger, MemoryLedger, WorldState};

pub const ADMIN_ID: &str = "x509::CN=admin,OU=client::CN=ca.org1.example.com";
pub const AUDITOR_ID: &str = "x509::CN=auditor,OU=client::CN=ca.org1.example.com";
pub const ALICE_ID: &str = "x509::CN=alice,OU=client::CN=ca.org1.example.com";
pub const BOB_ID: &str = "x509::CN=bob,OU=client::CN=ca.org1.example.com";

pub fn admin() -> CallerIdentity {
    CallerIdentity::new(ADMIN_ID).with_role("admin")
}

pub fn auditor() -> CallerIdentity {
    CallerIdentity::new(AUDITOR_ID).with_role("auditor")
}

pub fn alice() -> CallerIdentity {
    CallerIdentity::new(ALICE_ID).with_role("user")
}

pub fn bob() -> CallerIdentity {
    CallerIdentity::new(BOB_ID).with_role("user")
}

/// Caller with an id but no role attribute.
pub fn anonymous() -> CallerIdentity {
    CallerIdentity::new("x509::CN=nobody,OU=client::CN=ca.org1.example.com")
}

/// Create an asset as admin and commit it. Panics on failure.
pub fn seed_asset(ledger: &MemoryLedger, id: &str, owner: &str, value: i64) -> Asset {
    let registry = AssetRegistry::default();
    submit(ledger, &admin(), |inv| {
        registry.create_asset(inv, id, owner, value)
    })
    .expect("seeding asset should succeed")
    .output
}

/// Write raw bytes under `key`, bypassing the registry.
pub fn put_raw(ledger: &MemoryLedger, key: &str, bytes: &[u8]) {
    let mut tx = ledger.begin().unwrap();
    tx.put(key, bytes.to_vec()).unwrap();
    ledger.commit(tx).unwrap();
}

/// Read one asset as `caller` without committing.
pub fn read_as(
    ledger: &MemoryLedger,
    registry: &AssetRegistry,
    caller: &CallerIdentity,
    id: &str,
) -> RegistryResult<Asset> {
    evaluate(ledger, caller, |inv| registry.read_asset(inv, id))
}

/// Whether `id` is present, checked outside any authorization.
pub fn exists(ledger: &MemoryLedger, id: &str) -> bool {
    let registry = AssetRegistry::default();
    evaluate(ledger, &anonymous(), |inv| registry.asset_exists(inv, id)).unwrap()
}

/// Encoded record for an asset created by the admin, as a scan would yield it.
pub fn seed_record(id: &str, owner: &str, value: i64) -> KeyValue {
    KeyValue {
        key: id.to_string(),
        value: Asset::new(id, owner, value, ADMIN_ID).encode().unwrap(),
    }
}
