use thiserror::Error;

/// Result alias returned by every repository operation.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures raised by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The targeted row does not exist.
    #[error("record not found")]
    NotFound,
    /// Query or constraint failure reported by the database.
    #[error("database error: {0}")]
    Database(diesel::result::Error),
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Embedded migrations failed to apply.
    #[error("migration failed: {0}")]
    Migration(String),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::NotFound => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err = RepositoryError::from(diesel::result::Error::NotFound);
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn other_diesel_errors_are_wrapped() {
        let err = RepositoryError::from(diesel::result::Error::RollbackTransaction);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
