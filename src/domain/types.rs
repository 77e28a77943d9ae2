//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce the column constraints of the schema (positive
//! identifiers, bounded text, non-negative small integers) so that once a
//! value reaches the domain layer it can be written without further checks.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is longer than the column allows.
    #[error("value exceeds {max} characters")]
    TooLong { max: usize },
    /// Provided number falls outside the column range.
    #[error("value {value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    /// Provided code is not a member of the enumerated set.
    #[error("{value} is not a valid {field}")]
    InvalidChoice { field: &'static str, value: i16 },
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(AuthUserId, "Identifier of the external authentication identity.");
id_newtype!(UserProfileId, "Unique identifier for a staff profile.");
id_newtype!(RoleId, "Unique identifier for a role.");
id_newtype!(MenuId, "Unique identifier for a menu entry.");
id_newtype!(CustomerId, "Unique identifier for a customer.");
id_newtype!(TagId, "Unique identifier for a tag.");
id_newtype!(FollowUpId, "Unique identifier for a customer follow-up.");
id_newtype!(CourseId, "Unique identifier for a course.");
id_newtype!(BranchId, "Unique identifier for a branch.");
id_newtype!(ClassListId, "Unique identifier for a class.");
id_newtype!(CourseRecordId, "Unique identifier for a class session.");
id_newtype!(EnrollmentId, "Unique identifier for an enrollment.");
id_newtype!(StudyRecordId, "Unique identifier for a study record.");
id_newtype!(PaymentId, "Unique identifier for a payment.");

/// Trims the input and rejects blank or over-long values.
fn bounded_trimmed(value: String, max: usize) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if trimmed.chars().count() > max {
        return Err(TypeConstraintError::TooLong { max });
    }
    Ok(trimmed.to_string())
}

/// Generates a trimmed, non-empty string newtype limited to `$max` characters.
macro_rules! bounded_string_newtype {
    ($name:ident, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum number of characters the column accepts.
            pub const MAX_LEN: usize = $max;

            /// Constructs a trimmed, non-empty value within the length limit.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                Ok(Self(bounded_trimmed(value.into(), Self::MAX_LEN)?))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_string_newtype!(CustomerName, 32, "Customer display name.");
bounded_string_newtype!(CustomerQq, 64, "QQ account identifier, unique per customer.");
bounded_string_newtype!(QqName, 64, "QQ nickname of a customer.");
bounded_string_newtype!(ContactPhone, 32, "Free-form contact phone number.");
bounded_string_newtype!(ReferralName, 64, "Name of the person who referred a customer.");
bounded_string_newtype!(TagName, 32, "Unique tag label.");
bounded_string_newtype!(CourseName, 64, "Unique course name.");
bounded_string_newtype!(BranchName, 128, "Unique branch name.");
bounded_string_newtype!(BranchAddress, 128, "Postal address of a branch.");
bounded_string_newtype!(HomeworkTitle, 128, "Title of the homework set for a session.");
bounded_string_newtype!(ProfileName, 64, "Display name of a staff profile.");
bounded_string_newtype!(RoleName, 32, "Unique role name.");
bounded_string_newtype!(MenuName, 32, "Menu entry label.");
bounded_string_newtype!(MenuUrlName, 64, "Route identifier a menu entry points to.");

/// Trimmed, non-empty free text, stored exactly as entered.
///
/// Markup is not stripped on write; use [`FreeText::escaped`] when the
/// value is embedded in HTML.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct FreeText(String);

impl FreeText {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Maps blank or missing input to `None`.
    pub fn optional<S: Into<String>>(value: Option<S>) -> Option<Self> {
        value.and_then(|v| Self::new(v).ok())
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The text with HTML metacharacters escaped, safe to embed in markup.
    pub fn escaped(&self) -> String {
        ammonia::clean_text(&self.0)
    }
}

impl Display for FreeText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FreeText {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FreeText {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FreeText> for String {
    fn from(value: FreeText) -> Self {
        value.0
    }
}

/// Non-negative small integer (`0..=32767`): prices, durations, semesters, day numbers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i32", into = "i16")]
pub struct PositiveSmallInt(i16);

impl PositiveSmallInt {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        i16::try_from(value)
            .ok()
            .filter(|v| *v >= 0)
            .map(Self)
            .ok_or(TypeConstraintError::OutOfRange {
                value: i64::from(value),
                min: 0,
                max: i64::from(i16::MAX),
            })
    }

    pub const fn get(self) -> i16 {
        self.0
    }
}

impl Display for PositiveSmallInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for PositiveSmallInt {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i16> for PositiveSmallInt {
    type Error = TypeConstraintError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(i32::from(value))
    }
}

impl From<PositiveSmallInt> for i16 {
    fn from(value: PositiveSmallInt) -> Self {
        value.0
    }
}

/// Payment amount in whole currency units. Defaults to 500.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub struct PaymentAmount(i32);

impl PaymentAmount {
    /// Amount stored when the caller does not provide one.
    pub const DEFAULT: i32 = 500;

    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value < 0 {
            return Err(TypeConstraintError::OutOfRange {
                value: i64::from(value),
                min: 0,
                max: i64::from(i32::MAX),
            });
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Default for PaymentAmount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl Display for PaymentAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for PaymentAmount {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PaymentAmount> for i32 {
    fn from(value: PaymentAmount) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(CustomerId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(TagId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(CourseId::new(7).map(CourseId::get), Ok(7));
    }

    #[test]
    fn bounded_strings_trim_and_limit_length() {
        let qq = CustomerQq::new("  123456  ").expect("valid qq");
        assert_eq!(qq.as_str(), "123456");

        assert_eq!(TagName::new("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(
            TagName::new("x".repeat(33)),
            Err(TypeConstraintError::TooLong { max: 32 })
        );
        assert!(TagName::new("x".repeat(32)).is_ok());
    }

    #[test]
    fn bounded_strings_count_characters_not_bytes() {
        // 32 CJK characters are 96 bytes in UTF-8.
        let name = "张".repeat(32);
        assert!(CustomerName::new(name).is_ok());
    }

    #[test]
    fn free_text_keeps_user_input() {
        let text = FreeText::new("  Java & C++, budget < 5000 ").expect("valid text");
        assert_eq!(text.as_str(), "Java & C++, budget < 5000");
        assert_eq!(FreeText::new(" \n "), Err(TypeConstraintError::EmptyString));
        assert_eq!(FreeText::optional(Some("  ")), None);
    }

    #[test]
    fn free_text_escapes_for_markup() {
        let text = FreeText::new("<b>a & b</b>").expect("valid text");
        assert_eq!(text.as_str(), "<b>a & b</b>");
        assert!(!text.escaped().contains('<'));
        assert!(text.escaped().contains("&amp;"));
    }

    #[test]
    fn positive_small_int_range() {
        assert_eq!(PositiveSmallInt::new(0).map(PositiveSmallInt::get), Ok(0));
        assert_eq!(
            PositiveSmallInt::new(32767).map(PositiveSmallInt::get),
            Ok(32767)
        );
        assert!(PositiveSmallInt::new(-1).is_err());
        assert!(PositiveSmallInt::new(40000).is_err());
    }

    #[test]
    fn payment_amount_defaults_to_five_hundred() {
        assert_eq!(PaymentAmount::default().get(), 500);
        assert!(PaymentAmount::new(-1).is_err());
        assert_eq!(PaymentAmount::new(0).map(PaymentAmount::get), Ok(0));
    }

    #[test]
    fn bounded_strings_validate_on_deserialize() {
        let parsed: Result<RoleName, _> = serde_json::from_str("\"   \"");
        assert!(parsed.is_err());

        let parsed: RoleName = serde_json::from_str("\" admin \"").expect("valid role");
        assert_eq!(parsed.as_str(), "admin");
    }
}
