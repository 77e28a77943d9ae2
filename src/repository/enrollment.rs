//! Enrollments of customers into classes and their per-session study records.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::enrollment::{
    Enrollment, NewEnrollment, NewStudyRecord, StudyRecord, UpdateEnrollment, UpdateStudyRecord,
};
use crate::domain::types::{EnrollmentId, StudyRecordId};
use crate::models::enrollment::{
    Enrollment as DbEnrollment, NewEnrollment as DbNewEnrollment,
    NewStudyRecord as DbNewStudyRecord, StudyRecord as DbStudyRecord,
    UpdateEnrollment as DbUpdateEnrollment, UpdateStudyRecord as DbUpdateStudyRecord,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, EnrollmentListQuery, EnrollmentReader, EnrollmentWriter,
    StudyRecordListQuery, expect_deleted, into_domain,
};

impl EnrollmentReader for DieselRepository {
    fn get_enrollment_by_id(&self, id: EnrollmentId) -> RepositoryResult<Option<Enrollment>> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let enrollment = enrollments::table
            .find(id.get())
            .first::<DbEnrollment>(&mut conn)
            .optional()?;

        enrollment
            .map(|e| Enrollment::try_from(e).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_enrollments(&self, query: EnrollmentListQuery) -> RepositoryResult<Vec<Enrollment>> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let mut items = enrollments::table.into_boxed::<Sqlite>();

        if let Some(customer_id) = query.customer_id {
            items = items.filter(enrollments::customer_id.eq(customer_id.get()));
        }
        if let Some(class_id) = query.class_id {
            items = items.filter(enrollments::class_id.eq(class_id.get()));
        }

        let rows = items
            .order(enrollments::id.asc())
            .load::<DbEnrollment>(&mut conn)?;

        into_domain(rows)
    }

    fn get_study_record_by_id(
        &self,
        id: StudyRecordId,
    ) -> RepositoryResult<Option<StudyRecord>> {
        use crate::schema::study_records;

        let mut conn = self.conn()?;
        let record = study_records::table
            .find(id.get())
            .first::<DbStudyRecord>(&mut conn)
            .optional()?;

        record
            .map(|r| StudyRecord::try_from(r).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_study_records(
        &self,
        query: StudyRecordListQuery,
    ) -> RepositoryResult<Vec<StudyRecord>> {
        use crate::schema::study_records;

        let mut conn = self.conn()?;
        let mut items = study_records::table.into_boxed::<Sqlite>();

        if let Some(enrollment_id) = query.enrollment_id {
            items = items.filter(study_records::enrollment_id.eq(enrollment_id.get()));
        }
        if let Some(course_record_id) = query.course_record_id {
            items = items.filter(study_records::course_record_id.eq(course_record_id.get()));
        }

        let rows = items
            .order(study_records::id.asc())
            .load::<DbStudyRecord>(&mut conn)?;

        into_domain(rows)
    }
}

impl EnrollmentWriter for DieselRepository {
    fn create_enrollment(&self, new_enrollment: &NewEnrollment) -> RepositoryResult<Enrollment> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let insertable: DbNewEnrollment = new_enrollment.into();

        let row = diesel::insert_into(enrollments::table)
            .values(&insertable)
            .get_result::<DbEnrollment>(&mut conn)?;

        Enrollment::try_from(row).map_err(RepositoryError::from)
    }

    fn update_enrollment(
        &self,
        enrollment_id: EnrollmentId,
        updates: &UpdateEnrollment,
    ) -> RepositoryResult<Enrollment> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let changeset: DbUpdateEnrollment = updates.into();

        let row = diesel::update(enrollments::table.find(enrollment_id.get()))
            .set(&changeset)
            .get_result::<DbEnrollment>(&mut conn)?;

        Enrollment::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_enrollment(&self, enrollment_id: EnrollmentId) -> RepositoryResult<()> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(enrollments::table.find(enrollment_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }

    fn create_study_record(&self, new_record: &NewStudyRecord) -> RepositoryResult<StudyRecord> {
        use crate::schema::study_records;

        let mut conn = self.conn()?;
        let insertable: DbNewStudyRecord = new_record.into();

        let row = diesel::insert_into(study_records::table)
            .values(&insertable)
            .get_result::<DbStudyRecord>(&mut conn)?;

        StudyRecord::try_from(row).map_err(RepositoryError::from)
    }

    fn update_study_record(
        &self,
        record_id: StudyRecordId,
        updates: &UpdateStudyRecord,
    ) -> RepositoryResult<StudyRecord> {
        use crate::schema::study_records;

        let mut conn = self.conn()?;
        let changeset: DbUpdateStudyRecord = updates.into();

        let row = diesel::update(study_records::table.find(record_id.get()))
            .set(&changeset)
            .get_result::<DbStudyRecord>(&mut conn)?;

        StudyRecord::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_study_record(&self, record_id: StudyRecordId) -> RepositoryResult<()> {
        use crate::schema::study_records;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(study_records::table.find(record_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }
}
