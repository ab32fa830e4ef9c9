use crate::types::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Refresh of scope '{scope}' failed: {message}")]
    Refresh { scope: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[source] BoxError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a storage backend failure so it propagates unchanged to the caller.
    pub fn storage(err: impl Into<BoxError>) -> Self {
        Self::Storage(err.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Convenience alias for results in the domain layer.
pub type CoreResult<T> = Result<T, CoreError>;
