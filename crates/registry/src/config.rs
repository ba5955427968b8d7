use assetledger_core::error::CoreError;
use assetledger_core::policy::{Policy, ReadFallback};
use assetledger_core::roles::ROLE_ATTRIBUTE;

/// Registry configuration loaded from environment variables.
///
/// The defaults reproduce the policy existing ledgers were written under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Authorization policy applied to every operation.
    pub policy: Policy,
}

impl RegistryConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `ASSET_ROLE_ATTRIBUTE` | `role`  |
    /// | `ASSET_READ_FALLBACK`  | `owner` |
    ///
    /// `ASSET_READ_FALLBACK` is `owner` (other roles get the ownership check
    /// on single reads) or `deny` (other roles are rejected).
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let role_attribute = lookup("ASSET_ROLE_ATTRIBUTE")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| ROLE_ATTRIBUTE.into());
        if role_attribute.is_empty() {
            return Err(CoreError::Validation(
                "ASSET_ROLE_ATTRIBUTE must not be empty".into(),
            ));
        }

        let read_fallback = match lookup("ASSET_READ_FALLBACK") {
            Some(value) => ReadFallback::from_name(value.trim())?,
            None => ReadFallback::default(),
        };

        Ok(Self {
            policy: Policy {
                role_attribute,
                read_fallback,
            },
        })
    }
}
