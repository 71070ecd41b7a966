use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Result alias returned by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the service layer, one variant per response class.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body or query broke a field rule.
    #[error("{0}")]
    Validation(String),
    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Path and body identifiers disagree.
    #[error("ID mismatch")]
    IdMismatch,
    /// The caller abandoned the request.
    #[error("request was cancelled")]
    Cancelled,
    /// A dependency could not produce a result.
    #[error("{0}")]
    Unavailable(String),
    /// Unexpected persistence failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
