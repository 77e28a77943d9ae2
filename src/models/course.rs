//! Diesel models for courses and branches.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::course::{
    Branch as DomainBranch, Course as DomainCourse, NewBranch as DomainNewBranch,
    NewCourse as DomainNewCourse,
};
use crate::domain::types::{
    BranchAddress, BranchId, BranchName, CourseId, CourseName, PositiveSmallInt, FreeText,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::courses)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub price: i16,
    pub period: i16,
    pub outline: String,
    pub date: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::courses)]
pub struct NewCourse<'a> {
    pub name: &'a str,
    pub price: i16,
    pub period: i16,
    pub outline: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::branches)]
pub struct Branch {
    pub id: i32,
    pub name: String,
    pub addr: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::branches)]
pub struct NewBranch<'a> {
    pub name: &'a str,
    pub addr: &'a str,
}

impl TryFrom<Course> for DomainCourse {
    type Error = TypeConstraintError;

    fn try_from(course: Course) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CourseId::try_from(course.id)?,
            name: CourseName::new(course.name)?,
            price: PositiveSmallInt::try_from(course.price)?,
            period: PositiveSmallInt::try_from(course.period)?,
            outline: FreeText::new(course.outline)?,
            date: course.date,
        })
    }
}

impl<'a> From<&'a DomainNewCourse> for NewCourse<'a> {
    fn from(course: &'a DomainNewCourse) -> Self {
        Self {
            name: course.name.as_str(),
            price: course.price.get(),
            period: course.period.get(),
            outline: course.outline.as_str(),
        }
    }
}

impl TryFrom<Branch> for DomainBranch {
    type Error = TypeConstraintError;

    fn try_from(branch: Branch) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BranchId::try_from(branch.id)?,
            name: BranchName::new(branch.name)?,
            addr: BranchAddress::new(branch.addr)?,
        })
    }
}

impl<'a> From<&'a DomainNewBranch> for NewBranch<'a> {
    fn from(branch: &'a DomainNewBranch) -> Self {
        Self {
            name: branch.name.as_str(),
            addr: branch.addr.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn course_into_domain() {
        let db = Course {
            id: 3,
            name: "Linux Ops".to_string(),
            price: 9800,
            period: 5,
            outline: "Shell, networking, automation".to_string(),
            date: Utc::now().naive_utc(),
        };
        let domain = DomainCourse::try_from(db).expect("valid course");
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.price.get(), 9800);
        assert_eq!(domain.period.get(), 5);
    }

    #[test]
    fn branch_with_blank_address_is_rejected() {
        let db = Branch {
            id: 1,
            name: "Beijing".to_string(),
            addr: "  ".to_string(),
        };
        assert_eq!(
            DomainBranch::try_from(db).err(),
            Some(TypeConstraintError::EmptyString)
        );
    }
}
