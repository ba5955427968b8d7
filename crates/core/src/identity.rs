//! Caller identity as provided by the hosting platform.
//!
//! Authentication happens outside this workspace. The registry only needs
//! the caller's id and the value of named certificate attributes.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::roles::{Role, ROLE_ATTRIBUTE};
use crate::types::ClientId;

/// Read-only view of the authenticated caller of one invocation.
pub trait ClientIdentity {
    /// Unique id of the caller.
    fn id(&self) -> Result<ClientId, CoreError>;

    /// Value of a named attribute, or `None` if the caller does not carry it.
    fn attribute(&self, name: &str) -> Result<Option<String>, CoreError>;

    /// Resolve the role carried in attribute `name`.
    fn role(&self, name: &str) -> Result<Option<Role>, CoreError> {
        Ok(self.attribute(name)?.map(|value| Role::from_name(&value)))
    }
}

/// An identity whose id and attributes are already known.
///
/// Hosts construct one per invocation after verifying the caller's
/// credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    id: ClientId,
    attributes: HashMap<String, String>,
}

impl CallerIdentity {
    pub fn new(id: impl Into<ClientId>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Shorthand for setting the default role attribute.
    pub fn with_role(self, role: impl Into<String>) -> Self {
        self.with_attribute(ROLE_ATTRIBUTE, role)
    }
}

impl ClientIdentity for CallerIdentity {
    fn id(&self) -> Result<ClientId, CoreError> {
        if self.id.is_empty() {
            return Err(CoreError::Identity("failed to get client identity".into()));
        }
        Ok(self.id.clone())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, CoreError> {
        Ok(self.attributes.get(name).cloned())
    }
}
