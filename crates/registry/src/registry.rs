//! The asset registry service.
//!
//! Every public operation authorizes the caller first, then checks existence
//! (or absence), then reads or writes world state. Failures return before any
//! write is issued, and the surrounding transaction is never committed on
//! error, so a failed call leaves the ledger untouched.

use assetledger_core::asset::{validate_new_asset, Asset, ASSET_ENTITY};
use assetledger_core::error::CoreError;
use assetledger_core::policy::{Access, Operation, Permissions};

use crate::config::RegistryConfig;
use crate::context::Invocation;
use crate::error::RegistryResult;

/// Authorization-gated CRUD over assets stored in world state.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    config: RegistryConfig,
}

impl AssetRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Authorization
    // -----------------------------------------------------------------------

    fn authorize(&self, inv: &Invocation<'_>, operation: Operation) -> RegistryResult<Access> {
        let policy = &self.config.policy;
        let role = inv.caller_role(&policy.role_attribute)?;
        match policy.authorize(operation, role.as_ref()) {
            Ok(access) => Ok(access),
            Err(err) => {
                tracing::warn!(
                    operation = operation.verb(),
                    role = role.as_ref().map(|r| r.name()).unwrap_or("<none>"),
                    error = %err,
                    "Authorization denied",
                );
                Err(err.into())
            }
        }
    }

    /// Summarize what the caller is allowed to do.
    pub fn permissions(&self, inv: &Invocation<'_>) -> RegistryResult<Permissions> {
        let policy = &self.config.policy;
        let role = inv.caller_role(&policy.role_attribute)?;
        Ok(policy.permissions(role.as_ref()))
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Ledger initialization hook. Writes nothing.
    pub fn init_ledger(&self, _inv: &mut Invocation<'_>) -> RegistryResult<()> {
        tracing::info!("Asset ledger initialized");
        Ok(())
    }

    /// Register a new asset. Admin only.
    ///
    /// `created_by` is taken from the caller identity.
    pub fn create_asset(
        &self,
        inv: &mut Invocation<'_>,
        id: &str,
        owner: &str,
        value: i64,
    ) -> RegistryResult<Asset> {
        let creator = inv.caller_id()?;
        self.authorize(inv, Operation::Create)?;
        validate_new_asset(id, owner)?;

        if self.asset_exists(inv, id)? {
            return Err(CoreError::Conflict(format!("the asset {id} already exists")).into());
        }

        let asset = Asset::new(id, owner, value, creator);
        inv.state().put(id, asset.encode()?)?;

        tracing::info!(
            asset_id = %asset.id,
            owner = %asset.owner,
            value = asset.value,
            created_by = %asset.created_by,
            "Asset created",
        );

        Ok(asset)
    }

    /// Read one asset.
    ///
    /// Auditors see any asset; other roles see only assets they own (or are
    /// rejected, depending on the configured read fallback).
    pub fn read_asset(&self, inv: &mut Invocation<'_>, id: &str) -> RegistryResult<Asset> {
        let access = self.authorize(inv, Operation::Read)?;
        let asset = self.read_asset_internal(inv, id)?;

        if access == Access::OwnerOnly {
            let caller = inv.caller_id()?;
            if let Err(err) = access.check(&asset, &caller) {
                tracing::warn!(asset_id = %id, caller = %caller, "Read denied: not the owner");
                return Err(err.into());
            }
        }

        tracing::debug!(asset_id = %id, "Asset read");
        Ok(asset)
    }

    /// Replace the value of an existing asset. Admin only.
    ///
    /// Id, owner and creator are left exactly as stored.
    pub fn update_asset(
        &self,
        inv: &mut Invocation<'_>,
        id: &str,
        new_value: i64,
    ) -> RegistryResult<Asset> {
        self.authorize(inv, Operation::Update)?;
        self.ensure_exists(inv, id)?;

        let mut asset = self.read_asset_internal(inv, id)?;
        let old_value = asset.value;
        asset.value = new_value;
        inv.state().put(id, asset.encode()?)?;

        tracing::info!(asset_id = %id, old_value, new_value, "Asset updated");
        Ok(asset)
    }

    /// Remove an existing asset. Admin only.
    pub fn delete_asset(&self, inv: &mut Invocation<'_>, id: &str) -> RegistryResult<()> {
        self.authorize(inv, Operation::Delete)?;
        self.ensure_exists(inv, id)?;

        inv.state().delete(id)?;

        tracing::info!(asset_id = %id, "Asset deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// Every asset in the ledger, in world-state iteration order. Auditor only.
    pub fn get_all_assets(&self, inv: &mut Invocation<'_>) -> RegistryResult<Vec<Asset>> {
        self.authorize(inv, Operation::ListAll)?;
        let assets = collect_assets(inv, |_| true)?;
        tracing::debug!(count = assets.len(), "Listed all assets");
        Ok(assets)
    }

    /// Assets owned by the caller. Any caller with a role attribute.
    pub fn get_my_assets(&self, inv: &mut Invocation<'_>) -> RegistryResult<Vec<Asset>> {
        self.authorize(inv, Operation::ListOwn)?;
        let caller = inv.caller_id()?;
        let assets = collect_assets(inv, |asset| asset.is_owned_by(&caller))?;
        tracing::debug!(caller = %caller, count = assets.len(), "Listed own assets");
        Ok(assets)
    }

    // -----------------------------------------------------------------------
    // Internal helpers (no authorization)
    // -----------------------------------------------------------------------

    /// Whether any value is stored at `id`, valid or not.
    pub fn asset_exists(&self, inv: &mut Invocation<'_>, id: &str) -> RegistryResult<bool> {
        Ok(inv.state().get(id)?.is_some())
    }

    /// Load and decode the asset at `id`.
    pub fn read_asset_internal(&self, inv: &mut Invocation<'_>, id: &str) -> RegistryResult<Asset> {
        let bytes = inv.state().get(id)?.ok_or_else(|| not_found(id))?;
        Ok(Asset::decode(id, &bytes)?)
    }

    fn ensure_exists(&self, inv: &mut Invocation<'_>, id: &str) -> RegistryResult<()> {
        if !self.asset_exists(inv, id)? {
            return Err(not_found(id).into());
        }
        Ok(())
    }
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        entity: ASSET_ENTITY,
        id: id.to_string(),
    }
}

/// Full-range scan decoding every record. Any failure aborts the listing;
/// the scan is released when it goes out of scope, on every path.
fn collect_assets(
    inv: &mut Invocation<'_>,
    keep: impl Fn(&Asset) -> bool,
) -> RegistryResult<Vec<Asset>> {
    let scan = inv.state().scan_range("", "")?;
    let mut assets = Vec::new();
    for entry in scan {
        let entry = entry?;
        let asset = Asset::decode(&entry.key, &entry.value)?;
        if keep(&asset) {
            assets.push(asset);
        }
    }
    Ok(assets)
}
