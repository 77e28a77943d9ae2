//! Forms for opening classes and logging their sessions.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::choices::ClassType;
use crate::domain::class_list::{NewClassList, NewCourseRecord};
use crate::domain::types::{
    BranchId, ClassListId, CourseId, HomeworkTitle, PositiveSmallInt, FreeText,
    UserProfileId,
};
use crate::forms::{FormError, invalid, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Form data for a class (one course at one branch for one semester).
pub struct ClassListForm {
    pub course_id: i32,
    pub semester: i32,
    pub branch_id: i32,
    pub class_type: i16,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub teachers: Vec<i32>,
}

/// Class values together with the teachers to assign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassListPayload {
    pub class: NewClassList,
    pub teachers: Vec<UserProfileId>,
}

impl TryFrom<ClassListForm> for ClassListPayload {
    type Error = FormError;

    fn try_from(form: ClassListForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let mut class = NewClassList::new(
            CourseId::new(form.course_id).map_err(invalid("course_id"))?,
            PositiveSmallInt::new(form.semester).map_err(invalid("semester"))?,
            BranchId::new(form.branch_id).map_err(invalid("branch_id"))?,
            ClassType::try_from(form.class_type).map_err(invalid("class_type"))?,
            form.start_date,
        );
        if let Some(end_date) = form.end_date {
            class = class.end_date(end_date);
        }

        let mut teachers = form
            .teachers
            .into_iter()
            .map(|id| UserProfileId::new(id).map_err(invalid("teachers")))
            .collect::<Result<Vec<_>, _>>()?;
        teachers.sort_unstable();
        teachers.dedup();

        Ok(Self { class, teachers })
    }
}

fn default_has_homework() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for one day of a class.
pub struct CourseRecordForm {
    pub class_id: i32,
    pub day_num: i32,
    pub teacher_id: i32,
    #[serde(default = "default_has_homework")]
    pub has_homework: bool,
    #[validate(length(max = 128))]
    pub homework_title: Option<String>,
    pub homework_content: Option<String>,
    #[validate(length(min = 1))]
    pub outline: String,
}

impl TryFrom<CourseRecordForm> for NewCourseRecord {
    type Error = FormError;

    fn try_from(form: CourseRecordForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let record = NewCourseRecord::new(
            ClassListId::new(form.class_id).map_err(invalid("class_id"))?,
            PositiveSmallInt::new(form.day_num).map_err(invalid("day_num"))?,
            UserProfileId::new(form.teacher_id).map_err(invalid("teacher_id"))?,
            FreeText::new(form.outline).map_err(invalid("outline"))?,
        );

        if !form.has_homework {
            return Ok(record.without_homework());
        }

        match non_blank(form.homework_title) {
            Some(title) => Ok(record.homework(
                HomeworkTitle::new(title).map_err(invalid("homework_title"))?,
                FreeText::optional(form.homework_content),
            )),
            None => Ok(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    #[test]
    fn class_form_into_payload() {
        let form = ClassListForm {
            course_id: 1,
            semester: 12,
            branch_id: 2,
            class_type: 1,
            start_date: start(),
            end_date: None,
            teachers: vec![4, 4, 2],
        };

        let payload = ClassListPayload::try_from(form).expect("valid class");
        assert_eq!(payload.class.class_type, ClassType::FullTime);
        assert_eq!(payload.class.semester.get(), 12);
        assert_eq!(payload.class.end_date, None);
        assert_eq!(
            payload.teachers.iter().map(|t| t.get()).collect::<Vec<_>>(),
            vec![2, 4]
        );
    }

    #[test]
    fn class_form_rejects_negative_semester() {
        let form = ClassListForm {
            course_id: 1,
            semester: -1,
            branch_id: 2,
            class_type: 0,
            start_date: start(),
            end_date: None,
            teachers: Vec::new(),
        };

        let err = ClassListPayload::try_from(form).unwrap_err();
        assert!(matches!(err, FormError::InvalidField { field: "semester", .. }));
    }

    #[test]
    fn course_record_without_homework_drops_title() {
        let form = CourseRecordForm {
            class_id: 1,
            day_num: 3,
            teacher_id: 2,
            has_homework: false,
            homework_title: Some("ignored".to_string()),
            homework_content: None,
            outline: "Django ORM".to_string(),
        };

        let record = NewCourseRecord::try_from(form).expect("valid record");
        assert!(!record.has_homework);
        assert_eq!(record.homework_title, None);
    }

    #[test]
    fn course_record_form_defaults_to_homework() {
        let form: CourseRecordForm = serde_json::from_str(
            r#"{"class_id":1,"day_num":1,"teacher_id":2,"homework_title":"作业一","outline":"intro"}"#,
        )
        .expect("valid json");

        let record = NewCourseRecord::try_from(form).expect("valid record");
        assert!(record.has_homework);
        assert_eq!(
            record.homework_title.as_ref().map(HomeworkTitle::as_str),
            Some("作业一")
        );
        assert_eq!(record.homework_content, None);
    }
}
