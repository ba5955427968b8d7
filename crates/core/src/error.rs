use crate::types::AssetId;

/// Coarse classification of every failure the registry can surface.
///
/// Hosts map these onto their own transport (status codes, chaincode
/// responses); the registry itself never formats errors for end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authorization,
    NotFound,
    Conflict,
    Validation,
    Serialization,
    Store,
    Identity,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Authorization => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Validation => "VALIDATION_ERROR",
            Self::Serialization => "SERIALIZATION_ERROR",
            Self::Store => "STORE_ERROR",
            Self::Identity => "IDENTITY_ERROR",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: AssetId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller carries no role attribute at all.
    #[error("Forbidden: {0} attribute not found")]
    MissingAttribute(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Failed to {action} asset {id}: {source}")]
    Serialization {
        action: &'static str,
        id: AssetId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Identity error: {0}")]
    Identity(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::Conflict(_) => ErrorKind::Conflict,
            CoreError::MissingAttribute(_) | CoreError::Forbidden(_) => ErrorKind::Authorization,
            CoreError::Serialization { .. } => ErrorKind::Serialization,
            CoreError::Identity(_) => ErrorKind::Identity,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
