//! Diesel models for classes, their teachers and daily sessions.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::choices::ClassType;
use crate::domain::class_list::{
    ClassList as DomainClassList, CourseRecord as DomainCourseRecord,
    NewClassList as DomainNewClassList, NewCourseRecord as DomainNewCourseRecord,
};
use crate::domain::types::{
    BranchId, ClassListId, CourseId, CourseRecordId, HomeworkTitle, PositiveSmallInt,
    FreeText, TypeConstraintError, UserProfileId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::class_lists)]
pub struct ClassList {
    pub id: i32,
    pub course_id: i32,
    pub semester: i16,
    pub branch_id: i32,
    pub class_type: i16,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::class_lists)]
#[diesel(treat_none_as_null = true)]
pub struct NewClassList {
    pub course_id: i32,
    pub semester: i16,
    pub branch_id: i32,
    pub class_type: i16,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Queryable, Identifiable, Insertable)]
#[diesel(primary_key(class_id, user_profile_id))]
#[diesel(table_name = crate::schema::class_teachers)]
/// Association table linking classes to their teachers.
pub struct ClassTeacher {
    pub class_id: i32,
    pub user_profile_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(ClassList, foreign_key = class_id))]
#[diesel(table_name = crate::schema::course_records)]
pub struct CourseRecord {
    pub id: i32,
    pub class_id: i32,
    pub day_num: i16,
    pub teacher_id: i32,
    pub has_homework: bool,
    pub homework_title: Option<String>,
    pub homework_content: Option<String>,
    pub outline: String,
    pub date: NaiveDate,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::course_records)]
#[diesel(treat_none_as_null = true)]
pub struct NewCourseRecord<'a> {
    pub class_id: i32,
    pub day_num: i16,
    pub teacher_id: i32,
    pub has_homework: bool,
    pub homework_title: Option<&'a str>,
    pub homework_content: Option<&'a str>,
    pub outline: &'a str,
}

impl TryFrom<ClassList> for DomainClassList {
    type Error = TypeConstraintError;

    fn try_from(class: ClassList) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClassListId::try_from(class.id)?,
            course_id: CourseId::try_from(class.course_id)?,
            semester: PositiveSmallInt::try_from(class.semester)?,
            branch_id: BranchId::try_from(class.branch_id)?,
            class_type: ClassType::try_from(class.class_type)?,
            start_date: class.start_date,
            end_date: class.end_date,
        })
    }
}

impl From<&DomainNewClassList> for NewClassList {
    fn from(class: &DomainNewClassList) -> Self {
        Self {
            course_id: class.course_id.get(),
            semester: class.semester.get(),
            branch_id: class.branch_id.get(),
            class_type: class.class_type.value(),
            start_date: class.start_date,
            end_date: class.end_date,
        }
    }
}

impl TryFrom<CourseRecord> for DomainCourseRecord {
    type Error = TypeConstraintError;

    fn try_from(record: CourseRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CourseRecordId::try_from(record.id)?,
            class_id: ClassListId::try_from(record.class_id)?,
            day_num: PositiveSmallInt::try_from(record.day_num)?,
            teacher_id: UserProfileId::try_from(record.teacher_id)?,
            has_homework: record.has_homework,
            homework_title: record.homework_title.map(HomeworkTitle::new).transpose()?,
            homework_content: record
                .homework_content
                .map(FreeText::new)
                .transpose()?,
            outline: FreeText::new(record.outline)?,
            date: record.date,
        })
    }
}

impl<'a> From<&'a DomainNewCourseRecord> for NewCourseRecord<'a> {
    fn from(record: &'a DomainNewCourseRecord) -> Self {
        Self {
            class_id: record.class_id.get(),
            day_num: record.day_num.get(),
            teacher_id: record.teacher_id.get(),
            has_homework: record.has_homework,
            homework_title: record.homework_title.as_ref().map(HomeworkTitle::as_str),
            homework_content: record.homework_content.as_ref().map(FreeText::as_str),
            outline: record.outline.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_with_unknown_type_is_rejected() {
        let db = ClassList {
            id: 1,
            course_id: 1,
            semester: 3,
            branch_id: 1,
            class_type: 5,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            end_date: None,
        };
        assert_eq!(
            DomainClassList::try_from(db).err(),
            Some(TypeConstraintError::InvalidChoice {
                field: "class type",
                value: 5
            })
        );
    }

    #[test]
    fn course_record_without_homework_to_insertable() {
        let domain = DomainNewCourseRecord::new(
            ClassListId::new(2).expect("valid class id"),
            PositiveSmallInt::new(1).expect("valid day"),
            UserProfileId::new(4).expect("valid teacher id"),
            FreeText::new("Intro to Python").expect("valid outline"),
        )
        .without_homework();

        let insertable: NewCourseRecord = (&domain).into();
        assert!(!insertable.has_homework);
        assert_eq!(insertable.homework_title, None);
        assert_eq!(insertable.day_num, 1);
        assert_eq!(insertable.outline, "Intro to Python");
    }
}
