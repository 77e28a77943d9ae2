//! Forms for enrolling customers and grading their sessions.

use serde::Deserialize;
use validator::Validate;

use crate::domain::choices::{AttendanceStatus, ScoreGrade};
use crate::domain::enrollment::{NewEnrollment, NewStudyRecord, UpdateEnrollment};
use crate::domain::types::{
    ClassListId, CourseRecordId, CustomerId, EnrollmentId, FreeText, UserProfileId,
};
use crate::forms::{FormError, invalid};

#[derive(Debug, Deserialize)]
pub struct EnrollmentForm {
    pub customer_id: i32,
    pub class_id: i32,
    pub consultant_id: i32,
}

impl TryFrom<EnrollmentForm> for NewEnrollment {
    type Error = FormError;

    fn try_from(form: EnrollmentForm) -> Result<Self, Self::Error> {
        Ok(NewEnrollment::new(
            CustomerId::new(form.customer_id).map_err(invalid("customer_id"))?,
            ClassListId::new(form.class_id).map_err(invalid("class_id"))?,
            UserProfileId::new(form.consultant_id).map_err(invalid("consultant_id"))?,
        ))
    }
}

/// Contract flags toggled after enrollment.
#[derive(Debug, Default, Deserialize)]
pub struct ContractForm {
    #[serde(default)]
    pub contract_agreed: bool,
    #[serde(default)]
    pub contract_approved: bool,
}

impl From<ContractForm> for UpdateEnrollment {
    fn from(form: ContractForm) -> Self {
        UpdateEnrollment {
            contract_agreed: form.contract_agreed,
            contract_approved: form.contract_approved,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Attendance and score of one enrolled student for one session.
pub struct StudyRecordForm {
    pub enrollment_id: i32,
    pub course_record_id: i32,
    #[serde(default)]
    pub attendance: i16,
    pub score: i16,
    pub memo: Option<String>,
}

impl TryFrom<StudyRecordForm> for NewStudyRecord {
    type Error = FormError;

    fn try_from(form: StudyRecordForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let record = NewStudyRecord::new(
            EnrollmentId::new(form.enrollment_id).map_err(invalid("enrollment_id"))?,
            CourseRecordId::new(form.course_record_id).map_err(invalid("course_record_id"))?,
            ScoreGrade::try_from(form.score).map_err(invalid("score"))?,
        )
        .attendance(AttendanceStatus::try_from(form.attendance).map_err(invalid("attendance"))?);

        Ok(match FreeText::optional(form.memo) {
            Some(memo) => record.memo(memo),
            None => record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_record_form_defaults_to_present() {
        let form: StudyRecordForm =
            serde_json::from_str(r#"{"enrollment_id":1,"course_record_id":2,"score":-50}"#)
                .expect("valid json");

        let record = NewStudyRecord::try_from(form).expect("valid record");
        assert_eq!(record.attendance, AttendanceStatus::Present);
        assert_eq!(record.score, ScoreGrade::D);
        assert_eq!(record.memo, None);
    }

    #[test]
    fn study_record_form_rejects_unbucketed_score() {
        let form = StudyRecordForm {
            enrollment_id: 1,
            course_record_id: 2,
            attendance: 0,
            score: 95,
            memo: None,
        };

        let err = NewStudyRecord::try_from(form).unwrap_err();
        assert!(matches!(err, FormError::InvalidField { field: "score", .. }));
    }

    #[test]
    fn contract_form_defaults_to_unsigned() {
        let form: ContractForm = serde_json::from_str("{}").expect("valid json");
        let update = UpdateEnrollment::from(form);
        assert!(!update.contract_agreed);
        assert!(!update.contract_approved);
    }

    #[test]
    fn enrollment_form_rejects_zero_ids() {
        let form = EnrollmentForm {
            customer_id: 0,
            class_id: 1,
            consultant_id: 1,
        };

        let err = NewEnrollment::try_from(form).unwrap_err();
        assert!(matches!(err, FormError::InvalidField { field: "customer_id", .. }));
    }
}
