use assetledger_core::identity::ClientIdentity;
use assetledger_core::roles::Role;
use assetledger_core::types::ClientId;
use assetledger_state::WorldState;

use crate::error::RegistryResult;

/// Everything one registry call may touch: who is calling, and the world
/// state of the transaction it runs in.
pub struct Invocation<'a> {
    identity: &'a dyn ClientIdentity,
    state: &'a mut dyn WorldState,
}

impl<'a> Invocation<'a> {
    pub fn new(identity: &'a dyn ClientIdentity, state: &'a mut dyn WorldState) -> Self {
        Self { identity, state }
    }

    pub fn identity(&self) -> &dyn ClientIdentity {
        self.identity
    }

    pub fn state(&mut self) -> &mut (dyn WorldState + 'a) {
        &mut *self.state
    }

    pub fn caller_id(&self) -> RegistryResult<ClientId> {
        Ok(self.identity.id()?)
    }

    /// Role carried in attribute `attribute`, `None` if the caller has none.
    pub fn caller_role(&self, attribute: &str) -> RegistryResult<Option<Role>> {
        Ok(self.identity.role(attribute)?)
    }
}
