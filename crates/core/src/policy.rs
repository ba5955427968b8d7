//! Role-based authorization policy for registry operations.
//!
//! Every registry operation asks [`Policy::authorize`] before touching the
//! ledger. The match over `(Operation, Role)` is exhaustive, so adding a role
//! or an operation forces a decision here.

use serde::Serialize;

use crate::asset::Asset;
use crate::error::CoreError;
use crate::roles::{Role, ROLE_ATTRIBUTE};

/// Registry operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    ListAll,
    ListOwn,
}

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ListAll => "list all",
            Self::ListOwn => "list own",
        }
    }
}

/// What an authorized caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any asset.
    Unrestricted,
    /// Only assets whose owner equals the caller id.
    OwnerOnly,
}

impl Access {
    /// Check a loaded asset against this access level.
    ///
    /// `caller` is only consulted for [`Access::OwnerOnly`].
    pub fn check(self, asset: &Asset, caller: &str) -> Result<(), CoreError> {
        match self {
            Access::Unrestricted => Ok(()),
            Access::OwnerOnly if asset.is_owned_by(caller) => Ok(()),
            Access::OwnerOnly => Err(CoreError::Forbidden(
                "access denied: you can only view your own assets".into(),
            )),
        }
    }
}

/// How single reads treat roles other than `auditor` and `user`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFallback {
    /// Fall through to the ownership check, like `user`.
    #[default]
    OwnerCheck,
    /// Reject outright.
    Deny,
}

impl ReadFallback {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "owner" => Ok(Self::OwnerCheck),
            "deny" => Ok(Self::Deny),
            other => Err(CoreError::Validation(format!(
                "Unknown read fallback '{other}'. Must be one of: owner, deny"
            ))),
        }
    }
}

/// The authorization policy in force for one registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Name of the caller attribute that carries the role.
    pub role_attribute: String,
    pub read_fallback: ReadFallback,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            role_attribute: ROLE_ATTRIBUTE.to_string(),
            read_fallback: ReadFallback::default(),
        }
    }
}

impl Policy {
    /// Decide whether a caller holding `role` (or no role attribute) may
    /// perform `operation`.
    pub fn authorize(&self, operation: Operation, role: Option<&Role>) -> Result<Access, CoreError> {
        match operation {
            Operation::Create | Operation::Update | Operation::Delete => match role {
                Some(Role::Admin) => Ok(Access::Unrestricted),
                Some(Role::Auditor | Role::User | Role::Unknown(_)) | None => Err(
                    CoreError::Forbidden(format!("only admin can {} assets", operation.verb())),
                ),
            },
            Operation::ListAll => match role {
                Some(Role::Auditor) => Ok(Access::Unrestricted),
                Some(Role::Admin | Role::User | Role::Unknown(_)) | None => Err(
                    CoreError::Forbidden("only auditors can view all assets".into()),
                ),
            },
            Operation::Read | Operation::ListOwn => match role {
                None => Err(CoreError::MissingAttribute(self.role_attribute.clone())),
                Some(Role::Auditor) if operation == Operation::Read => Ok(Access::Unrestricted),
                Some(Role::Auditor | Role::User) => Ok(Access::OwnerOnly),
                Some(other @ (Role::Admin | Role::Unknown(_))) => match self.read_fallback {
                    ReadFallback::OwnerCheck => Ok(Access::OwnerOnly),
                    ReadFallback::Deny => Err(CoreError::Forbidden(format!(
                        "role '{other}' may not {} assets",
                        operation.verb()
                    ))),
                },
            },
        }
    }

    /// Summarize what `role` is allowed to do under this policy.
    pub fn permissions(&self, role: Option<&Role>) -> Permissions {
        let read = self.authorize(Operation::Read, role).ok();
        Permissions {
            create_asset: self.authorize(Operation::Create, role).is_ok(),
            read_any_asset: read == Some(Access::Unrestricted),
            read_own_assets: read.is_some(),
            update_asset: self.authorize(Operation::Update, role).is_ok(),
            delete_asset: self.authorize(Operation::Delete, role).is_ok(),
            list_all_assets: self.authorize(Operation::ListAll, role).is_ok(),
            list_own_assets: self.authorize(Operation::ListOwn, role).is_ok(),
        }
    }
}

/// Capabilities of a caller, derived from [`Policy::authorize`].
///
/// Serializes with camelCase keys, the shape hosts return from their
/// user-info endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub create_asset: bool,
    pub read_any_asset: bool,
    pub read_own_assets: bool,
    pub update_asset: bool,
    pub delete_asset: bool,
    pub list_all_assets: bool,
    pub list_own_assets: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
