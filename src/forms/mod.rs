//! Form payloads backing the write paths.
//!
//! Each form derives [`validator::Validate`] for shape checks and converts
//! into a domain value with `TryFrom`, which applies the stricter domain
//! constraints and reports the offending field.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod class_list;
pub mod course;
pub mod customer;
pub mod enrollment;
pub mod payment;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: TypeConstraintError,
    },
}

/// Tags a domain constraint failure with the form field it came from.
fn invalid(field: &'static str) -> impl FnOnce(TypeConstraintError) -> FormError {
    move |reason| FormError::InvalidField { field, reason }
}

/// Treats blank optional inputs as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
