//! Classes, teacher assignments and per-day course records.

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::class_list::{ClassList, CourseRecord, NewClassList, NewCourseRecord};
use crate::domain::types::{ClassListId, CourseRecordId, UserProfileId};
use crate::domain::user_profile::UserProfile;
use crate::models::class_list::{
    ClassList as DbClassList, ClassTeacher as DbClassTeacher, CourseRecord as DbCourseRecord,
    NewClassList as DbNewClassList, NewCourseRecord as DbNewCourseRecord,
};
use crate::models::user_profile::UserProfile as DbUserProfile;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ClassListQuery, ClassListReader, ClassListWriter, DieselRepository, expect_deleted,
    into_domain, unique_ids,
};

impl ClassListReader for DieselRepository {
    fn get_class_by_id(&self, id: ClassListId) -> RepositoryResult<Option<ClassList>> {
        use crate::schema::class_lists;

        let mut conn = self.conn()?;
        let class = class_lists::table
            .find(id.get())
            .first::<DbClassList>(&mut conn)
            .optional()?;

        class
            .map(|c| ClassList::try_from(c).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_classes(&self, query: ClassListQuery) -> RepositoryResult<Vec<ClassList>> {
        use crate::schema::class_lists;

        let mut conn = self.conn()?;
        let mut items = class_lists::table.into_boxed::<Sqlite>();

        if let Some(branch_id) = query.branch_id {
            items = items.filter(class_lists::branch_id.eq(branch_id.get()));
        }
        if let Some(course_id) = query.course_id {
            items = items.filter(class_lists::course_id.eq(course_id.get()));
        }

        let rows = items
            .order((class_lists::start_date.desc(), class_lists::id.desc()))
            .load::<DbClassList>(&mut conn)?;

        into_domain(rows)
    }

    fn list_class_teachers(&self, class_id: ClassListId) -> RepositoryResult<Vec<UserProfile>> {
        use crate::schema::{class_teachers, user_profiles};

        let mut conn = self.conn()?;
        let rows = user_profiles::table
            .inner_join(class_teachers::table)
            .filter(class_teachers::class_id.eq(class_id.get()))
            .select(user_profiles::all_columns)
            .order(user_profiles::id.asc())
            .load::<DbUserProfile>(&mut conn)?;

        into_domain(rows)
    }

    fn get_course_record_by_id(
        &self,
        id: CourseRecordId,
    ) -> RepositoryResult<Option<CourseRecord>> {
        use crate::schema::course_records;

        let mut conn = self.conn()?;
        let record = course_records::table
            .find(id.get())
            .first::<DbCourseRecord>(&mut conn)
            .optional()?;

        record
            .map(|r| CourseRecord::try_from(r).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_course_records(&self, class_id: ClassListId) -> RepositoryResult<Vec<CourseRecord>> {
        use crate::schema::course_records;

        let mut conn = self.conn()?;
        let rows = course_records::table
            .filter(course_records::class_id.eq(class_id.get()))
            .order((course_records::day_num.asc(), course_records::id.asc()))
            .load::<DbCourseRecord>(&mut conn)?;

        into_domain(rows)
    }
}

fn insert_class(conn: &mut SqliteConnection, new_class: &NewClassList) -> QueryResult<DbClassList> {
    use crate::schema::class_lists;

    diesel::insert_into(class_lists::table)
        .values(&DbNewClassList::from(new_class))
        .get_result(conn)
}

fn replace_teachers(
    conn: &mut SqliteConnection,
    class_id: i32,
    teacher_ids: &[UserProfileId],
) -> QueryResult<usize> {
    use crate::schema::class_teachers;

    diesel::delete(class_teachers::table.filter(class_teachers::class_id.eq(class_id)))
        .execute(conn)?;

    let links = unique_ids(teacher_ids)
        .into_iter()
        .map(|teacher_id| DbClassTeacher {
            class_id,
            user_profile_id: teacher_id.get(),
        })
        .collect::<Vec<_>>();

    if links.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(class_teachers::table)
        .values(links)
        .execute(conn)
}

impl ClassListWriter for DieselRepository {
    fn create_class(&self, new_class: &NewClassList) -> RepositoryResult<ClassList> {
        let mut conn = self.conn()?;
        let row = insert_class(&mut conn, new_class)?;

        ClassList::try_from(row).map_err(RepositoryError::from)
    }

    fn update_class(
        &self,
        class_id: ClassListId,
        updates: &NewClassList,
    ) -> RepositoryResult<ClassList> {
        use crate::schema::class_lists;

        let mut conn = self.conn()?;
        let changeset: DbNewClassList = updates.into();

        let row = diesel::update(class_lists::table.find(class_id.get()))
            .set(&changeset)
            .get_result::<DbClassList>(&mut conn)?;

        ClassList::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_class(&self, class_id: ClassListId) -> RepositoryResult<()> {
        use crate::schema::class_lists;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(class_lists::table.find(class_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }

    fn set_class_teachers(
        &self,
        class_id: ClassListId,
        teacher_ids: &[UserProfileId],
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction(|conn| replace_teachers(conn, class_id.get(), teacher_ids))
            .map_err(RepositoryError::from)
    }

    fn create_class_with_teachers(
        &self,
        new_class: &NewClassList,
        teacher_ids: &[UserProfileId],
    ) -> RepositoryResult<ClassList> {
        let mut conn = self.conn()?;

        let row = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let row = insert_class(conn, new_class)?;
            replace_teachers(conn, row.id, teacher_ids)?;
            Ok(row)
        })?;

        ClassList::try_from(row).map_err(RepositoryError::from)
    }

    fn create_course_record(
        &self,
        new_record: &NewCourseRecord,
    ) -> RepositoryResult<CourseRecord> {
        use crate::schema::course_records;

        let mut conn = self.conn()?;
        let insertable: DbNewCourseRecord = new_record.into();

        let row = diesel::insert_into(course_records::table)
            .values(&insertable)
            .get_result::<DbCourseRecord>(&mut conn)?;

        CourseRecord::try_from(row).map_err(RepositoryError::from)
    }

    fn update_course_record(
        &self,
        record_id: CourseRecordId,
        updates: &NewCourseRecord,
    ) -> RepositoryResult<CourseRecord> {
        use crate::schema::course_records;

        let mut conn = self.conn()?;
        let changeset: DbNewCourseRecord = updates.into();

        let row = diesel::update(course_records::table.find(record_id.get()))
            .set(&changeset)
            .get_result::<DbCourseRecord>(&mut conn)?;

        CourseRecord::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_course_record(&self, record_id: CourseRecordId) -> RepositoryResult<()> {
        use crate::schema::course_records;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(course_records::table.find(record_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }
}
