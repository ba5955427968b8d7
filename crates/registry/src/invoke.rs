//! Transaction wrappers for registry calls.
//!
//! [`submit`] runs one call in a fresh transaction and commits it only if the
//! call succeeded. [`evaluate`] runs a call and always discards its writes,
//! for queries. Neither retries: a commit conflict is returned to the caller.

use assetledger_core::identity::ClientIdentity;
use assetledger_state::{CommitReceipt, Ledger};

use crate::context::Invocation;
use crate::error::RegistryResult;

/// Output of a committed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted<T> {
    pub output: T,
    pub receipt: CommitReceipt,
}

/// Run `call` in a new transaction and commit it.
///
/// If `call` fails the transaction is dropped and nothing is written. If the
/// commit fails validation (another commit changed what `call` read), the
/// error classifies as a conflict.
pub fn submit<L, T, F>(
    ledger: &L,
    identity: &dyn ClientIdentity,
    call: F,
) -> RegistryResult<Submitted<T>>
where
    L: Ledger,
    F: FnOnce(&mut Invocation<'_>) -> RegistryResult<T>,
{
    let mut tx = ledger.begin()?;
    let output = {
        let mut inv = Invocation::new(identity, &mut tx);
        call(&mut inv)?
    };

    let receipt = match ledger.commit(tx) {
        Ok(receipt) => receipt,
        Err(err) => {
            tracing::warn!(error = %err, "Invocation not committed");
            return Err(err.into());
        }
    };
    tracing::debug!(tx_id = %receipt.tx_id, height = receipt.height, "Invocation committed");

    Ok(Submitted { output, receipt })
}

/// Run `call` against a fresh transaction without committing.
pub fn evaluate<L, T, F>(ledger: &L, identity: &dyn ClientIdentity, call: F) -> RegistryResult<T>
where
    L: Ledger,
    F: FnOnce(&mut Invocation<'_>) -> RegistryResult<T>,
{
    let mut tx = ledger.begin()?;
    let mut inv = Invocation::new(identity, &mut tx);
    call(&mut inv)
}
