//! Enrolling customers into classes and grading their sessions.

use crate::domain::enrollment::{
    Enrollment, NewEnrollment, NewStudyRecord, StudyRecord, UpdateStudyRecord,
};
use crate::domain::types::{CustomerId, EnrollmentId};
use crate::forms::enrollment::{ContractForm, EnrollmentForm, StudyRecordForm};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    EnrollmentListQuery, EnrollmentReader, EnrollmentWriter, StudyRecordListQuery,
};
use crate::services::{ServiceError, ServiceResult};

/// Enrolls a customer into a class. Each customer may join a class once.
pub fn enroll_customer<R>(repo: &R, form: EnrollmentForm) -> ServiceResult<Enrollment>
where
    R: EnrollmentWriter + ?Sized,
{
    let new_enrollment: NewEnrollment = form.try_into()?;

    repo.create_enrollment(&new_enrollment).map_err(|err| match err {
        RepositoryError::UniqueViolation(_) => ServiceError::Conflict(format!(
            "customer {} is already enrolled in class {}",
            new_enrollment.customer_id, new_enrollment.class_id
        )),
        err => {
            log::error!("Failed to enroll customer: {err}");
            ServiceError::from(err)
        }
    })
}

pub fn update_contract<R>(
    repo: &R,
    enrollment_id: EnrollmentId,
    form: ContractForm,
) -> ServiceResult<Enrollment>
where
    R: EnrollmentWriter + ?Sized,
{
    repo.update_enrollment(enrollment_id, &form.into())
        .map_err(|err| {
            log::error!("Failed to update contract of enrollment {enrollment_id}: {err}");
            ServiceError::from(err)
        })
}

/// Records attendance and score for one session, replacing an earlier
/// grade for the same enrollment and session.
pub fn grade_session<R>(repo: &R, form: StudyRecordForm) -> ServiceResult<StudyRecord>
where
    R: EnrollmentReader + EnrollmentWriter + ?Sized,
{
    let record: NewStudyRecord = form.try_into()?;

    if repo.get_enrollment_by_id(record.enrollment_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let existing = repo.list_study_records(
        StudyRecordListQuery::new()
            .enrollment(record.enrollment_id)
            .course_record(record.course_record_id),
    )?;

    let stored = match existing.first() {
        Some(previous) => {
            let updates = UpdateStudyRecord {
                attendance: record.attendance,
                score: record.score,
                memo: record.memo.clone(),
            };
            repo.update_study_record(previous.id, &updates)
        }
        None => repo.create_study_record(&record),
    };

    stored.map_err(|err| {
        log::error!(
            "Failed to grade enrollment {} for session {}: {err}",
            record.enrollment_id,
            record.course_record_id
        );
        ServiceError::from(err)
    })
}

/// Study records of an enrollment, oldest first.
pub fn list_grades<R>(repo: &R, enrollment_id: EnrollmentId) -> ServiceResult<Vec<StudyRecord>>
where
    R: EnrollmentReader + ?Sized,
{
    repo.list_study_records(StudyRecordListQuery::new().enrollment(enrollment_id))
        .map_err(ServiceError::from)
}

/// Enrollments of a customer across all classes.
pub fn list_customer_enrollments<R>(
    repo: &R,
    customer_id: CustomerId,
) -> ServiceResult<Vec<Enrollment>>
where
    R: EnrollmentReader + ?Sized,
{
    repo.list_enrollments(EnrollmentListQuery::new().customer(customer_id))
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::choices::{AttendanceStatus, ScoreGrade};
    use crate::domain::enrollment::UpdateEnrollment;
    use crate::domain::types::StudyRecordId;
    use crate::repository::errors::RepositoryResult;

    fn enrolled_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("valid timestamp")
    }

    fn session_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 2).expect("valid date")
    }

    #[derive(Default)]
    struct FakeRepo {
        enrollments: RefCell<Vec<Enrollment>>,
        study_records: RefCell<Vec<StudyRecord>>,
    }

    impl EnrollmentReader for FakeRepo {
        fn get_enrollment_by_id(&self, id: EnrollmentId) -> RepositoryResult<Option<Enrollment>> {
            Ok(self.enrollments.borrow().iter().find(|e| e.id == id).cloned())
        }

        fn list_enrollments(
            &self,
            query: EnrollmentListQuery,
        ) -> RepositoryResult<Vec<Enrollment>> {
            Ok(self
                .enrollments
                .borrow()
                .iter()
                .filter(|e| query.customer_id.is_none_or(|c| e.customer_id == c))
                .filter(|e| query.class_id.is_none_or(|c| e.class_id == c))
                .cloned()
                .collect())
        }

        fn get_study_record_by_id(
            &self,
            id: StudyRecordId,
        ) -> RepositoryResult<Option<StudyRecord>> {
            Ok(self.study_records.borrow().iter().find(|r| r.id == id).cloned())
        }

        fn list_study_records(
            &self,
            query: StudyRecordListQuery,
        ) -> RepositoryResult<Vec<StudyRecord>> {
            Ok(self
                .study_records
                .borrow()
                .iter()
                .filter(|r| query.enrollment_id.is_none_or(|e| r.enrollment_id == e))
                .filter(|r| query.course_record_id.is_none_or(|c| r.course_record_id == c))
                .cloned()
                .collect())
        }
    }

    impl EnrollmentWriter for FakeRepo {
        fn create_enrollment(&self, new_enrollment: &NewEnrollment) -> RepositoryResult<Enrollment> {
            let mut enrollments = self.enrollments.borrow_mut();
            if enrollments.iter().any(|e| {
                e.customer_id == new_enrollment.customer_id && e.class_id == new_enrollment.class_id
            }) {
                return Err(RepositoryError::UniqueViolation(
                    "UNIQUE constraint failed: enrollments.customer_id, enrollments.class_id"
                        .to_string(),
                ));
            }
            let enrollment = Enrollment {
                id: EnrollmentId::new(enrollments.len() as i32 + 1).expect("valid id"),
                customer_id: new_enrollment.customer_id,
                class_id: new_enrollment.class_id,
                consultant_id: new_enrollment.consultant_id,
                contract_agreed: new_enrollment.contract_agreed,
                contract_approved: new_enrollment.contract_approved,
                date: enrolled_at(),
            };
            enrollments.push(enrollment.clone());
            Ok(enrollment)
        }

        fn update_enrollment(
            &self,
            enrollment_id: EnrollmentId,
            updates: &UpdateEnrollment,
        ) -> RepositoryResult<Enrollment> {
            let mut enrollments = self.enrollments.borrow_mut();
            let enrollment = enrollments
                .iter_mut()
                .find(|e| e.id == enrollment_id)
                .ok_or(RepositoryError::NotFound)?;
            enrollment.contract_agreed = updates.contract_agreed;
            enrollment.contract_approved = updates.contract_approved;
            Ok(enrollment.clone())
        }

        fn delete_enrollment(&self, enrollment_id: EnrollmentId) -> RepositoryResult<()> {
            self.enrollments
                .borrow_mut()
                .retain(|e| e.id != enrollment_id);
            Ok(())
        }

        fn create_study_record(&self, new_record: &NewStudyRecord) -> RepositoryResult<StudyRecord> {
            let mut records = self.study_records.borrow_mut();
            let record = StudyRecord {
                id: StudyRecordId::new(records.len() as i32 + 1).expect("valid id"),
                enrollment_id: new_record.enrollment_id,
                course_record_id: new_record.course_record_id,
                attendance: new_record.attendance,
                score: new_record.score,
                memo: new_record.memo.clone(),
                date: session_date(),
            };
            records.push(record.clone());
            Ok(record)
        }

        fn update_study_record(
            &self,
            record_id: StudyRecordId,
            updates: &UpdateStudyRecord,
        ) -> RepositoryResult<StudyRecord> {
            let mut records = self.study_records.borrow_mut();
            let record = records
                .iter_mut()
                .find(|r| r.id == record_id)
                .ok_or(RepositoryError::NotFound)?;
            record.attendance = updates.attendance;
            record.score = updates.score;
            record.memo = updates.memo.clone();
            Ok(record.clone())
        }

        fn delete_study_record(&self, record_id: StudyRecordId) -> RepositoryResult<()> {
            self.study_records
                .borrow_mut()
                .retain(|r| r.id != record_id);
            Ok(())
        }
    }

    fn enrollment_form() -> EnrollmentForm {
        EnrollmentForm {
            customer_id: 1,
            class_id: 1,
            consultant_id: 1,
        }
    }

    fn grade(score: i16, attendance: i16) -> StudyRecordForm {
        StudyRecordForm {
            enrollment_id: 1,
            course_record_id: 1,
            attendance,
            score,
            memo: None,
        }
    }

    #[test]
    fn enroll_twice_is_a_conflict() {
        let repo = FakeRepo::default();
        let enrollment = enroll_customer(&repo, enrollment_form()).expect("enrolled");
        assert!(!enrollment.contract_agreed);

        let result = enroll_customer(&repo, enrollment_form());

        assert!(matches!(result, Err(ServiceError::Conflict(msg)) if msg.contains("already enrolled")));
    }

    #[test]
    fn update_contract_sets_flags() {
        let repo = FakeRepo::default();
        let enrollment = enroll_customer(&repo, enrollment_form()).expect("enrolled");

        let updated = update_contract(
            &repo,
            enrollment.id,
            ContractForm {
                contract_agreed: true,
                contract_approved: false,
            },
        )
        .expect("contract updated");

        assert!(updated.contract_agreed);
        assert!(!updated.contract_approved);
    }

    #[test]
    fn grading_twice_replaces_the_grade() {
        let repo = FakeRepo::default();
        enroll_customer(&repo, enrollment_form()).expect("enrolled");

        let first = grade_session(&repo, grade(80, 0)).expect("graded");
        let second = grade_session(&repo, grade(-100, 1)).expect("regraded");

        assert_eq!(first.id, second.id);
        assert_eq!(second.score, ScoreGrade::Copy);
        assert_eq!(second.attendance, AttendanceStatus::Late);
        assert_eq!(repo.study_records.borrow().len(), 1);
    }

    #[test]
    fn grading_unknown_enrollment_is_not_found() {
        let repo = FakeRepo::default();

        let result = grade_session(&repo, grade(80, 0));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn grading_with_unbucketed_score_is_rejected() {
        let repo = FakeRepo::default();
        enroll_customer(&repo, enrollment_form()).expect("enrolled");

        let result = grade_session(&repo, grade(95, 0));

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(repo.study_records.borrow().is_empty());
    }
}
