use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Getting a connection out of the pool failed.
    #[error("failed to get a database connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A lookup expected to match a record found none.
    #[error("record not found")]
    NotFound,
    /// A unique constraint (e.g. a duplicate slug) was violated.
    #[error("unique constraint violated: {0}")]
    ConstraintViolation(String),
    /// Stored data failed domain validation on the way out of the database.
    #[error("invalid stored data: {0}")]
    Validation(String),
    /// Any other database error.
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::ConstraintViolation(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
