//! Courses and the branches (campuses) where classes are held.

use diesel::prelude::*;

use crate::domain::course::{Branch, Course, NewBranch, NewCourse};
use crate::domain::types::{BranchId, CourseId};
use crate::models::course::{
    Branch as DbBranch, Course as DbCourse, NewBranch as DbNewBranch, NewCourse as DbNewCourse,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CourseReader, CourseWriter, DieselRepository, expect_deleted, into_domain,
};

impl CourseReader for DieselRepository {
    fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        use crate::schema::courses;

        let mut conn = self.conn()?;
        let course = courses::table
            .find(id.get())
            .first::<DbCourse>(&mut conn)
            .optional()?;

        course
            .map(|c| Course::try_from(c).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_courses(&self) -> RepositoryResult<Vec<Course>> {
        use crate::schema::courses;

        let mut conn = self.conn()?;
        let rows = courses::table
            .order(courses::name.asc())
            .load::<DbCourse>(&mut conn)?;

        into_domain(rows)
    }

    fn get_branch_by_id(&self, id: BranchId) -> RepositoryResult<Option<Branch>> {
        use crate::schema::branches;

        let mut conn = self.conn()?;
        let branch = branches::table
            .find(id.get())
            .first::<DbBranch>(&mut conn)
            .optional()?;

        branch
            .map(|b| Branch::try_from(b).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_branches(&self) -> RepositoryResult<Vec<Branch>> {
        use crate::schema::branches;

        let mut conn = self.conn()?;
        let rows = branches::table
            .order(branches::name.asc())
            .load::<DbBranch>(&mut conn)?;

        into_domain(rows)
    }
}

impl CourseWriter for DieselRepository {
    fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course> {
        use crate::schema::courses;

        let mut conn = self.conn()?;
        let insertable: DbNewCourse = new_course.into();

        let row = diesel::insert_into(courses::table)
            .values(&insertable)
            .get_result::<DbCourse>(&mut conn)?;

        Course::try_from(row).map_err(RepositoryError::from)
    }

    fn update_course(&self, course_id: CourseId, updates: &NewCourse) -> RepositoryResult<Course> {
        use crate::schema::courses;

        let mut conn = self.conn()?;
        let changeset: DbNewCourse = updates.into();

        let row = diesel::update(courses::table.find(course_id.get()))
            .set(&changeset)
            .get_result::<DbCourse>(&mut conn)?;

        Course::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_course(&self, course_id: CourseId) -> RepositoryResult<()> {
        use crate::schema::courses;

        let mut conn = self.conn()?;
        let affected = diesel::delete(courses::table.find(course_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }

    fn create_branch(&self, new_branch: &NewBranch) -> RepositoryResult<Branch> {
        use crate::schema::branches;

        let mut conn = self.conn()?;
        let insertable: DbNewBranch = new_branch.into();

        let row = diesel::insert_into(branches::table)
            .values(&insertable)
            .get_result::<DbBranch>(&mut conn)?;

        Branch::try_from(row).map_err(RepositoryError::from)
    }

    fn update_branch(&self, branch_id: BranchId, updates: &NewBranch) -> RepositoryResult<Branch> {
        use crate::schema::branches;

        let mut conn = self.conn()?;
        let changeset: DbNewBranch = updates.into();

        let row = diesel::update(branches::table.find(branch_id.get()))
            .set(&changeset)
            .get_result::<DbBranch>(&mut conn)?;

        Branch::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_branch(&self, branch_id: BranchId) -> RepositoryResult<()> {
        use crate::schema::branches;

        let mut conn = self.conn()?;
        let affected = diesel::delete(branches::table.find(branch_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }
}
