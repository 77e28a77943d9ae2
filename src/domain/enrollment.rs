//! Enrollments and the per-session study records hanging off them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::choices::{AttendanceStatus, ScoreGrade};
use crate::domain::types::{
    ClassListId, CourseRecordId, CustomerId, EnrollmentId, FreeText, StudyRecordId,
    UserProfileId,
};

/// A customer's registration into a class. `(customer_id, class_id)` is unique.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub customer_id: CustomerId,
    pub class_id: ClassListId,
    pub consultant_id: UserProfileId,
    /// The student accepted the contract terms.
    pub contract_agreed: bool,
    /// Staff reviewed and approved the contract.
    pub contract_approved: bool,
    pub date: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewEnrollment {
    pub customer_id: CustomerId,
    pub class_id: ClassListId,
    pub consultant_id: UserProfileId,
    pub contract_agreed: bool,
    pub contract_approved: bool,
}

impl NewEnrollment {
    #[must_use]
    pub fn new(
        customer_id: CustomerId,
        class_id: ClassListId,
        consultant_id: UserProfileId,
    ) -> Self {
        Self {
            customer_id,
            class_id,
            consultant_id,
            contract_agreed: false,
            contract_approved: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct UpdateEnrollment {
    pub contract_agreed: bool,
    pub contract_approved: bool,
}

/// Attendance and grade of one enrolled student for one session.
///
/// `(enrollment_id, course_record_id)` is unique.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyRecord {
    pub id: StudyRecordId,
    pub enrollment_id: EnrollmentId,
    pub course_record_id: CourseRecordId,
    pub attendance: AttendanceStatus,
    pub score: ScoreGrade,
    pub memo: Option<FreeText>,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewStudyRecord {
    pub enrollment_id: EnrollmentId,
    pub course_record_id: CourseRecordId,
    pub attendance: AttendanceStatus,
    pub score: ScoreGrade,
    pub memo: Option<FreeText>,
}

impl NewStudyRecord {
    #[must_use]
    pub fn new(
        enrollment_id: EnrollmentId,
        course_record_id: CourseRecordId,
        score: ScoreGrade,
    ) -> Self {
        Self {
            enrollment_id,
            course_record_id,
            attendance: AttendanceStatus::default(),
            score,
            memo: None,
        }
    }

    #[must_use]
    pub fn attendance(mut self, attendance: AttendanceStatus) -> Self {
        self.attendance = attendance;
        self
    }

    #[must_use]
    pub fn memo(mut self, memo: FreeText) -> Self {
        self.memo = Some(memo);
        self
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UpdateStudyRecord {
    pub attendance: AttendanceStatus,
    pub score: ScoreGrade,
    pub memo: Option<FreeText>,
}

impl From<&StudyRecord> for UpdateStudyRecord {
    fn from(record: &StudyRecord) -> Self {
        Self {
            attendance: record.attendance,
            score: record.score,
            memo: record.memo.clone(),
        }
    }
}
