//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository, service or form error
//! types, so the conversions out of [`TypeConstraintError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_constraint_errors_become_validation_failures() {
        let repo_err = RepositoryError::from(TypeConstraintError::NonPositiveId);
        assert!(matches!(repo_err, RepositoryError::ValidationError(_)));

        let service_err = ServiceError::from(TypeConstraintError::TooLong { max: 32 });
        assert!(matches!(service_err, ServiceError::Validation(msg) if msg.contains("32")));
    }
}
