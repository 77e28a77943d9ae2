//! Business operations layered over the repository traits.
//!
//! Services are generic over the reader/writer traits they need so tests can
//! swap in in-memory fakes or `mockall` mocks.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod access;
pub mod class_list;
pub mod customer;
pub mod enrollment;
pub mod payment;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// Uniqueness or referential conflict with stored data.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::UniqueViolation(msg) | RepositoryError::ForeignKeyViolation(msg) => {
                ServiceError::Conflict(msg)
            }
            RepositoryError::ConstraintViolation(msg) | RepositoryError::ValidationError(msg) => {
                ServiceError::Validation(msg)
            }
            RepositoryError::DatabaseError(msg)
            | RepositoryError::ConnectionError(msg)
            | RepositoryError::Unexpected(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_map_onto_service_errors() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::UniqueViolation(
                "UNIQUE constraint failed: customers.qq".into()
            )),
            ServiceError::Conflict(msg) if msg.contains("customers.qq")
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ForeignKeyViolation("FOREIGN KEY".into())),
            ServiceError::Conflict(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConstraintViolation("CHECK".into())),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConnectionError("pool".into())),
            ServiceError::Internal(_)
        ));
    }
}
