//! The asset record and its ledger codec.
//!
//! Records are stored as JSON under the asset id. The key names (`ID`,
//! `owner`, `value`, `createdBy`) are the ones already present on existing
//! ledgers and must not change.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{AssetId, ClientId};

/// Entity name used in `NotFound` errors.
pub const ASSET_ENTITY: &str = "Asset";

/// A registered asset.
///
/// Only `value` is mutable after creation. `created_by` is always the
/// identity that submitted the create, never a caller-supplied value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Asset {
    #[serde(rename = "ID")]
    pub id: AssetId,
    pub owner: ClientId,
    pub value: i64,
    #[serde(rename = "createdBy")]
    pub created_by: ClientId,
}

impl Asset {
    pub fn new(
        id: impl Into<AssetId>,
        owner: impl Into<ClientId>,
        value: i64,
        created_by: impl Into<ClientId>,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            value,
            created_by: created_by.into(),
        }
    }

    /// Whether `client` is the recorded owner.
    pub fn is_owned_by(&self, client: &str) -> bool {
        self.owner == client
    }

    /// Serialize to the stored JSON form.
    pub fn encode(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(|source| CoreError::Serialization {
            action: "encode",
            id: self.id.clone(),
            source,
        })
    }

    /// Decode a stored record. `key` is only used for error reporting.
    pub fn decode(key: &str, bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|source| CoreError::Serialization {
            action: "decode",
            id: key.to_string(),
            source,
        })
    }
}

/// Validate the caller-supplied fields of a new asset.
///
/// Ids and owners must be non-blank; the ledger cannot address an empty key.
pub fn validate_new_asset(id: &str, owner: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::Validation("Asset id must not be empty".into()));
    }
    if owner.trim().is_empty() {
        return Err(CoreError::Validation("Asset owner must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
