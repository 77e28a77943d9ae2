use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Failures surfaced by repository writes and reads.
///
/// Store messages are kept verbatim; for SQLite they name the offending
/// table and columns (e.g. `UNIQUE constraint failed: customers.qq`).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),

    /// Not-null and check constraint failures.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn from_database_error(kind: DatabaseErrorKind, message: String) -> RepositoryError {
    match kind {
        DatabaseErrorKind::UniqueViolation => RepositoryError::UniqueViolation(message),
        DatabaseErrorKind::ForeignKeyViolation => RepositoryError::ForeignKeyViolation(message),
        DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation => {
            RepositoryError::ConstraintViolation(message)
        }
        // SQLite reports some CHECK failures without a dedicated kind.
        _ if message.starts_with("CHECK constraint failed") => {
            RepositoryError::ConstraintViolation(message)
        }
        _ => RepositoryError::DatabaseError(message),
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => {
                from_database_error(kind, info.message().to_string())
            }
            DieselError::InvalidCString(_)
            | DieselError::SerializationError(_)
            | DieselError::DeserializationError(_)
            | DieselError::QueryBuilderError(_) => RepositoryError::ValidationError(err.to_string()),
            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("Transaction failed: {err}"))
            }
            _ => RepositoryError::Unexpected(err.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}
