//! Courses on offer and the branches that run them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BranchAddress, BranchId, BranchName, CourseId, CourseName, PositiveSmallInt, FreeText,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: CourseName,
    pub price: PositiveSmallInt,
    /// Duration in months.
    pub period: PositiveSmallInt,
    pub outline: FreeText,
    pub date: NaiveDateTime,
}

/// Values written when creating a course, or replacing its mutable columns.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewCourse {
    pub name: CourseName,
    pub price: PositiveSmallInt,
    pub period: PositiveSmallInt,
    pub outline: FreeText,
}

impl NewCourse {
    #[must_use]
    pub fn new(
        name: CourseName,
        price: PositiveSmallInt,
        period: PositiveSmallInt,
        outline: FreeText,
    ) -> Self {
        Self {
            name,
            price,
            period,
            outline,
        }
    }
}

/// A physical campus.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    pub id: BranchId,
    pub name: BranchName,
    pub addr: BranchAddress,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewBranch {
    pub name: BranchName,
    pub addr: BranchAddress,
}

impl NewBranch {
    #[must_use]
    pub fn new(name: BranchName, addr: BranchAddress) -> Self {
        Self { name, addr }
    }
}
