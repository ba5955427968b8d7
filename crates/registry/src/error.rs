use assetledger_core::error::{CoreError, ErrorKind};
use assetledger_state::StateError;

/// Error returned by every registry operation.
///
/// Wraps [`CoreError`] for domain failures and [`StateError`] for world-state
/// failures. [`RegistryError::kind`] gives the classification hosts should
/// act on.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A domain-level error from `assetledger_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reading, writing or committing world state.
    #[error("World state error: {0}")]
    State(#[from] StateError),
}

/// Convenience type alias for registry return values.
pub type RegistryResult<T> = Result<T, RegistryError>;

impl RegistryError {
    /// Classify the error.
    ///
    /// - Commit-time read conflicts map to [`ErrorKind::Conflict`]: another
    ///   invocation changed what this one read.
    /// - Every other state failure maps to [`ErrorKind::Store`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Core(core) => core.kind(),
            RegistryError::State(state) if state.is_conflict() => ErrorKind::Conflict,
            RegistryError::State(_) => ErrorKind::Store,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
