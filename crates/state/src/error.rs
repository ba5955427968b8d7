/// Failures raised by a world-state backend.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A key read by the transaction was changed by a commit since.
    #[error("Read conflict on key '{key}': it changed after the transaction read it")]
    ReadConflict { key: String },

    /// A scanned range is no longer what the transaction saw: a key was
    /// inserted or deleted inside it, or an existing key was rewritten.
    #[error("Stale range ['{start}', '{end}'): committed keys changed after the scan")]
    StaleRange { start: String, end: String },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid range: start '{start}' is after end '{end}'")]
    InvalidRange { start: String, end: String },

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl StateError {
    /// Whether the failure comes from a concurrent commit rather than the
    /// backend itself.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StateError::ReadConflict { .. } | StateError::StaleRange { .. }
        )
    }
}
