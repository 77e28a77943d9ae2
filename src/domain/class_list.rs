//! Cohorts and their daily sessions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::choices::ClassType;
use crate::domain::types::{
    BranchId, ClassListId, CourseId, CourseRecordId, HomeworkTitle, PositiveSmallInt,
    FreeText, UserProfileId,
};

/// One scheduled running of a course at a branch for a semester.
///
/// `(branch_id, course_id, semester)` is unique.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassList {
    pub id: ClassListId,
    pub course_id: CourseId,
    pub semester: PositiveSmallInt,
    pub branch_id: BranchId,
    pub class_type: ClassType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewClassList {
    pub course_id: CourseId,
    pub semester: PositiveSmallInt,
    pub branch_id: BranchId,
    pub class_type: ClassType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl NewClassList {
    #[must_use]
    pub fn new(
        course_id: CourseId,
        semester: PositiveSmallInt,
        branch_id: BranchId,
        class_type: ClassType,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            course_id,
            semester,
            branch_id,
            class_type,
            start_date,
            end_date: None,
        }
    }

    #[must_use]
    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// One day of instruction within a class. `(class_id, day_num)` is unique.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseRecord {
    pub id: CourseRecordId,
    pub class_id: ClassListId,
    pub day_num: PositiveSmallInt,
    pub teacher_id: UserProfileId,
    pub has_homework: bool,
    pub homework_title: Option<HomeworkTitle>,
    pub homework_content: Option<FreeText>,
    pub outline: FreeText,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewCourseRecord {
    pub class_id: ClassListId,
    pub day_num: PositiveSmallInt,
    pub teacher_id: UserProfileId,
    pub has_homework: bool,
    pub homework_title: Option<HomeworkTitle>,
    pub homework_content: Option<FreeText>,
    pub outline: FreeText,
}

impl NewCourseRecord {
    /// Sessions carry homework unless told otherwise.
    #[must_use]
    pub fn new(
        class_id: ClassListId,
        day_num: PositiveSmallInt,
        teacher_id: UserProfileId,
        outline: FreeText,
    ) -> Self {
        Self {
            class_id,
            day_num,
            teacher_id,
            has_homework: true,
            homework_title: None,
            homework_content: None,
            outline,
        }
    }

    #[must_use]
    pub fn homework(mut self, title: HomeworkTitle, content: Option<FreeText>) -> Self {
        self.has_homework = true;
        self.homework_title = Some(title);
        self.homework_content = content;
        self
    }

    #[must_use]
    pub fn without_homework(mut self) -> Self {
        self.has_homework = false;
        self.homework_title = None;
        self.homework_content = None;
        self
    }
}
