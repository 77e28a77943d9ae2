//! Diesel models for enrollments and study records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::choices::{AttendanceStatus, ScoreGrade};
use crate::domain::enrollment::{
    Enrollment as DomainEnrollment, NewEnrollment as DomainNewEnrollment,
    NewStudyRecord as DomainNewStudyRecord, StudyRecord as DomainStudyRecord,
    UpdateEnrollment as DomainUpdateEnrollment, UpdateStudyRecord as DomainUpdateStudyRecord,
};
use crate::domain::types::{
    ClassListId, CourseRecordId, CustomerId, EnrollmentId, FreeText, StudyRecordId,
    TypeConstraintError, UserProfileId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::enrollments)]
pub struct Enrollment {
    pub id: i32,
    pub customer_id: i32,
    pub class_id: i32,
    pub consultant_id: i32,
    pub contract_agreed: bool,
    pub contract_approved: bool,
    pub date: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::enrollments)]
pub struct NewEnrollment {
    pub customer_id: i32,
    pub class_id: i32,
    pub consultant_id: i32,
    pub contract_agreed: bool,
    pub contract_approved: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::enrollments)]
pub struct UpdateEnrollment {
    pub contract_agreed: bool,
    pub contract_approved: bool,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Enrollment, foreign_key = enrollment_id))]
#[diesel(table_name = crate::schema::study_records)]
pub struct StudyRecord {
    pub id: i32,
    pub enrollment_id: i32,
    pub course_record_id: i32,
    pub attendance: i16,
    pub score: i16,
    pub memo: Option<String>,
    pub date: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::study_records)]
pub struct NewStudyRecord<'a> {
    pub enrollment_id: i32,
    pub course_record_id: i32,
    pub attendance: i16,
    pub score: i16,
    pub memo: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::study_records)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateStudyRecord<'a> {
    pub attendance: i16,
    pub score: i16,
    pub memo: Option<&'a str>,
}

impl TryFrom<Enrollment> for DomainEnrollment {
    type Error = TypeConstraintError;

    fn try_from(enrollment: Enrollment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EnrollmentId::try_from(enrollment.id)?,
            customer_id: CustomerId::try_from(enrollment.customer_id)?,
            class_id: ClassListId::try_from(enrollment.class_id)?,
            consultant_id: UserProfileId::try_from(enrollment.consultant_id)?,
            contract_agreed: enrollment.contract_agreed,
            contract_approved: enrollment.contract_approved,
            date: enrollment.date,
        })
    }
}

impl From<&DomainNewEnrollment> for NewEnrollment {
    fn from(enrollment: &DomainNewEnrollment) -> Self {
        Self {
            customer_id: enrollment.customer_id.get(),
            class_id: enrollment.class_id.get(),
            consultant_id: enrollment.consultant_id.get(),
            contract_agreed: enrollment.contract_agreed,
            contract_approved: enrollment.contract_approved,
        }
    }
}

impl From<&DomainUpdateEnrollment> for UpdateEnrollment {
    fn from(update: &DomainUpdateEnrollment) -> Self {
        Self {
            contract_agreed: update.contract_agreed,
            contract_approved: update.contract_approved,
        }
    }
}

impl TryFrom<StudyRecord> for DomainStudyRecord {
    type Error = TypeConstraintError;

    fn try_from(record: StudyRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StudyRecordId::try_from(record.id)?,
            enrollment_id: EnrollmentId::try_from(record.enrollment_id)?,
            course_record_id: CourseRecordId::try_from(record.course_record_id)?,
            attendance: AttendanceStatus::try_from(record.attendance)?,
            score: ScoreGrade::try_from(record.score)?,
            memo: record.memo.map(FreeText::new).transpose()?,
            date: record.date,
        })
    }
}

impl<'a> From<&'a DomainNewStudyRecord> for NewStudyRecord<'a> {
    fn from(record: &'a DomainNewStudyRecord) -> Self {
        Self {
            enrollment_id: record.enrollment_id.get(),
            course_record_id: record.course_record_id.get(),
            attendance: record.attendance.value(),
            score: record.score.value(),
            memo: record.memo.as_ref().map(FreeText::as_str),
        }
    }
}

impl<'a> From<&'a DomainUpdateStudyRecord> for UpdateStudyRecord<'a> {
    fn from(record: &'a DomainUpdateStudyRecord) -> Self {
        Self {
            attendance: record.attendance.value(),
            score: record.score.value(),
            memo: record.memo.as_ref().map(FreeText::as_str),
        }
    }
}
