use models::validate::FieldErrors;
use thiserror::Error;

use crate::store::StoreError;

/// Request-pipeline outcomes. The first four render as client errors with a
/// `{message}` or field-map body; `Store` and `Hash` are server faults and
/// are genericized at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing/malformed request body or path identifier.
    #[error("{0}")]
    Input(String),
    /// Field-level validation or reference failures.
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
