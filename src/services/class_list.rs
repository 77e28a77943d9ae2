//! Course catalogue, class scheduling and session logging.

use crate::domain::class_list::{ClassList, CourseRecord, NewCourseRecord};
use crate::domain::course::{Branch, Course, NewBranch, NewCourse};
use crate::domain::types::ClassListId;
use crate::forms::class_list::{ClassListForm, ClassListPayload, CourseRecordForm};
use crate::forms::course::{BranchForm, CourseForm};
use crate::repository::{ClassListReader, ClassListWriter, CourseWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn add_course<R>(repo: &R, form: CourseForm) -> ServiceResult<Course>
where
    R: CourseWriter + ?Sized,
{
    let new_course: NewCourse = form.try_into()?;

    repo.create_course(&new_course).map_err(|err| {
        log::error!("Failed to add course {}: {err}", new_course.name);
        ServiceError::from(err)
    })
}

pub fn add_branch<R>(repo: &R, form: BranchForm) -> ServiceResult<Branch>
where
    R: CourseWriter + ?Sized,
{
    let new_branch: NewBranch = form.try_into()?;

    repo.create_branch(&new_branch).map_err(|err| {
        log::error!("Failed to add branch {}: {err}", new_branch.name);
        ServiceError::from(err)
    })
}

/// Creates a class and assigns its teachers in one transaction.
///
/// The `(branch, course, semester)` triple is unique; a repeat is reported
/// as [`ServiceError::Conflict`].
pub fn open_class<R>(repo: &R, form: ClassListForm) -> ServiceResult<ClassList>
where
    R: ClassListWriter + ?Sized,
{
    let payload = ClassListPayload::try_from(form)?;

    let class = repo
        .create_class_with_teachers(&payload.class, &payload.teachers)
        .map_err(|err| {
            log::error!("Failed to open class: {err}");
            ServiceError::from(err)
        })?;

    log::info!(
        "Opened class {} (course {}, semester {}) at branch {}",
        class.id,
        class.course_id,
        class.semester,
        class.branch_id
    );

    Ok(class)
}

/// Logs one day of instruction for an existing class.
pub fn record_session<R>(repo: &R, form: CourseRecordForm) -> ServiceResult<CourseRecord>
where
    R: ClassListReader + ClassListWriter + ?Sized,
{
    let record: NewCourseRecord = form.try_into()?;

    if repo.get_class_by_id(record.class_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.create_course_record(&record).map_err(|err| {
        log::error!(
            "Failed to record day {} of class {}: {err}",
            record.day_num,
            record.class_id
        );
        ServiceError::from(err)
    })
}

/// Sessions of a class ordered by day.
pub fn list_sessions<R>(repo: &R, class_id: ClassListId) -> ServiceResult<Vec<CourseRecord>>
where
    R: ClassListReader + ?Sized,
{
    repo.list_course_records(class_id)
        .map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::choices::ClassType;
    use crate::domain::types::{BranchId, CourseId, PositiveSmallInt};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date")
    }

    fn class_form(teachers: Vec<i32>) -> ClassListForm {
        ClassListForm {
            course_id: 1,
            semester: 3,
            branch_id: 1,
            class_type: 0,
            start_date: start(),
            end_date: None,
            teachers,
        }
    }

    fn stored_class() -> ClassList {
        ClassList {
            id: ClassListId::new(5).expect("valid id"),
            course_id: CourseId::new(1).expect("valid id"),
            semester: PositiveSmallInt::new(3).expect("valid semester"),
            branch_id: BranchId::new(1).expect("valid id"),
            class_type: ClassType::Weekend,
            start_date: start(),
            end_date: None,
        }
    }

    #[test]
    fn open_class_assigns_teachers() {
        let mut repo = MockRepository::new();
        repo.expect_create_class_with_teachers()
            .withf(|class, ids| {
                class.semester.get() == 3 && ids.iter().map(|id| id.get()).eq([2, 3])
            })
            .times(1)
            .returning(|_, _| Ok(stored_class()));
        repo.expect_create_class().never();

        let class = open_class(&repo, class_form(vec![3, 2])).expect("class opened");

        assert_eq!(class.id.get(), 5);
    }

    #[test]
    fn duplicate_class_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_class_with_teachers().returning(|_, _| {
            Err(RepositoryError::UniqueViolation(
                "UNIQUE constraint failed: class_lists.branch_id, class_lists.course_id, class_lists.semester"
                    .to_string(),
            ))
        });

        let result = open_class(&repo, class_form(vec![2]));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn unknown_teacher_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_class_with_teachers().returning(|_, _| {
            Err(RepositoryError::ForeignKeyViolation(
                "FOREIGN KEY constraint failed".to_string(),
            ))
        });

        let result = open_class(&repo, class_form(vec![99]));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn session_for_missing_class_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_class_by_id().returning(|_| Ok(None));
        repo.expect_create_course_record().never();

        let form = CourseRecordForm {
            class_id: 9,
            day_num: 1,
            teacher_id: 2,
            has_homework: false,
            homework_title: None,
            homework_content: None,
            outline: "intro".to_string(),
        };

        assert!(matches!(
            record_session(&repo, form),
            Err(ServiceError::NotFound)
        ));
    }
}
