//! Persistence traits and their Diesel implementation.
//!
//! Every write goes through the store, which enforces uniqueness, foreign
//! keys, enumerated `CHECK` constraints and cascade deletes. Store failures
//! come back as [`errors::RepositoryError`].

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::choices::LeadSource;
use crate::domain::class_list::{ClassList, CourseRecord, NewClassList, NewCourseRecord};
use crate::domain::course::{Branch, Course, NewBranch, NewCourse};
use crate::domain::customer::{Customer, CustomerDependents, NewCustomer, NewTag, Tag};
use crate::domain::enrollment::{
    Enrollment, NewEnrollment, NewStudyRecord, StudyRecord, UpdateEnrollment, UpdateStudyRecord,
};
use crate::domain::follow_up::{CustomerFollowUp, NewCustomerFollowUp};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::types::{
    AuthUserId, BranchId, ClassListId, CourseId, CourseRecordId, CustomerId, CustomerQq,
    EnrollmentId, FollowUpId, MenuId, PaymentId, RoleId, StudyRecordId, TagId, TagName, TypeConstraintError,
    UserProfileId,
};
use crate::domain::user_profile::{Menu, NewMenu, NewRole, NewUserProfile, Role, UserProfile};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod class_list;
pub mod course;
pub mod customer;
pub mod enrollment;
pub mod errors;
pub mod follow_up;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod payment;
pub mod user_profile;

/// Pool-backed repository implementing every reader and writer trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Converts loaded rows into domain values, failing on the first invalid row.
fn into_domain<T, D>(rows: Vec<T>) -> RepositoryResult<Vec<D>>
where
    D: TryFrom<T, Error = TypeConstraintError>,
{
    rows.into_iter()
        .map(|row| D::try_from(row).map_err(RepositoryError::from))
        .collect()
}

/// Maps a delete that touched no rows to [`RepositoryError::NotFound`].
fn expect_deleted(affected: usize) -> RepositoryResult<()> {
    if affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Sorted, duplicate-free copy of the ids linked through a join table.
fn unique_ids<T: Copy + Ord>(ids: &[T]) -> Vec<T> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl Pagination {
    /// Rows skipped before the page; saturates at `i64::MAX` for pages past
    /// any realistic table size.
    fn offset(&self) -> i64 {
        (self.page.max(1) - 1)
            .checked_mul(self.per_page)
            .and_then(|offset| i64::try_from(offset).ok())
            .unwrap_or(i64::MAX)
    }

    fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerListQuery {
    pub consultant_id: Option<UserProfileId>,
    pub tag_id: Option<TagId>,
    pub source: Option<LeadSource>,
    /// Matched against name, QQ, QQ nickname and phone.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consultant(mut self, consultant_id: UserProfileId) -> Self {
        self.consultant_id = Some(consultant_id);
        self
    }

    pub fn tag(mut self, tag_id: TagId) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn source(mut self, source: LeadSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassListQuery {
    pub branch_id: Option<BranchId>,
    pub course_id: Option<CourseId>,
}

impl ClassListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    pub fn course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentListQuery {
    pub customer_id: Option<CustomerId>,
    pub class_id: Option<ClassListId>,
}

impl EnrollmentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn class(mut self, class_id: ClassListId) -> Self {
        self.class_id = Some(class_id);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudyRecordListQuery {
    pub enrollment_id: Option<EnrollmentId>,
    pub course_record_id: Option<CourseRecordId>,
}

impl StudyRecordListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enrollment(mut self, enrollment_id: EnrollmentId) -> Self {
        self.enrollment_id = Some(enrollment_id);
        self
    }

    pub fn course_record(mut self, course_record_id: CourseRecordId) -> Self {
        self.course_record_id = Some(course_record_id);
        self
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    fn get_customer_by_qq(&self, qq: &CustomerQq) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
    fn list_customer_tags(&self, customer_id: CustomerId) -> RepositoryResult<Vec<Tag>>;
    fn count_customer_dependents(
        &self,
        customer_id: CustomerId,
    ) -> RepositoryResult<CustomerDependents>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    /// Replaces every mutable column. The creation `date` is kept.
    fn update_customer(
        &self,
        customer_id: CustomerId,
        updates: &NewCustomer,
    ) -> RepositoryResult<Customer>;
    /// Deletes the customer together with its follow-ups, enrollments (and
    /// their study records), payments and tag links.
    fn delete_customer(&self, customer_id: CustomerId) -> RepositoryResult<()>;
    fn set_customer_tags(&self, customer_id: CustomerId, tag_ids: &[TagId])
    -> RepositoryResult<usize>;
    /// Inserts the customer and links its tags in one transaction.
    fn create_customer_with_tags(
        &self,
        new_customer: &NewCustomer,
        tag_ids: &[TagId],
    ) -> RepositoryResult<Customer>;
    /// Replaces the customer's columns and tag set in one transaction.
    fn update_customer_with_tags(
        &self,
        customer_id: CustomerId,
        updates: &NewCustomer,
        tag_ids: &[TagId],
    ) -> RepositoryResult<Customer>;
}

pub trait TagReader {
    fn get_tag_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>>;
    fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
    fn get_tag_by_name(&self, name: &TagName) -> RepositoryResult<Option<Tag>>;
}

pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, tag_id: TagId, updates: &NewTag) -> RepositoryResult<Tag>;
    fn delete_tag(&self, tag_id: TagId) -> RepositoryResult<()>;
}

pub trait FollowUpReader {
    fn get_follow_up_by_id(&self, id: FollowUpId) -> RepositoryResult<Option<CustomerFollowUp>>;
    /// Follow-ups of a customer, newest first.
    fn list_follow_ups(&self, customer_id: CustomerId)
    -> RepositoryResult<Vec<CustomerFollowUp>>;
}

pub trait FollowUpWriter {
    fn create_follow_up(
        &self,
        follow_up: &NewCustomerFollowUp,
    ) -> RepositoryResult<CustomerFollowUp>;
    fn update_follow_up(
        &self,
        follow_up_id: FollowUpId,
        updates: &NewCustomerFollowUp,
    ) -> RepositoryResult<CustomerFollowUp>;
    fn delete_follow_up(&self, follow_up_id: FollowUpId) -> RepositoryResult<()>;
}

pub trait CourseReader {
    fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>>;
    fn list_courses(&self) -> RepositoryResult<Vec<Course>>;
    fn get_branch_by_id(&self, id: BranchId) -> RepositoryResult<Option<Branch>>;
    fn list_branches(&self) -> RepositoryResult<Vec<Branch>>;
}

pub trait CourseWriter {
    fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course>;
    fn update_course(&self, course_id: CourseId, updates: &NewCourse) -> RepositoryResult<Course>;
    fn delete_course(&self, course_id: CourseId) -> RepositoryResult<()>;
    fn create_branch(&self, new_branch: &NewBranch) -> RepositoryResult<Branch>;
    fn update_branch(&self, branch_id: BranchId, updates: &NewBranch) -> RepositoryResult<Branch>;
    fn delete_branch(&self, branch_id: BranchId) -> RepositoryResult<()>;
}

pub trait ClassListReader {
    fn get_class_by_id(&self, id: ClassListId) -> RepositoryResult<Option<ClassList>>;
    fn list_classes(&self, query: ClassListQuery) -> RepositoryResult<Vec<ClassList>>;
    fn list_class_teachers(&self, class_id: ClassListId) -> RepositoryResult<Vec<UserProfile>>;
    fn get_course_record_by_id(&self, id: CourseRecordId)
    -> RepositoryResult<Option<CourseRecord>>;
    /// Sessions of a class ordered by day number.
    fn list_course_records(&self, class_id: ClassListId) -> RepositoryResult<Vec<CourseRecord>>;
}

pub trait ClassListWriter {
    fn create_class(&self, new_class: &NewClassList) -> RepositoryResult<ClassList>;
    fn update_class(
        &self,
        class_id: ClassListId,
        updates: &NewClassList,
    ) -> RepositoryResult<ClassList>;
    fn delete_class(&self, class_id: ClassListId) -> RepositoryResult<()>;
    fn set_class_teachers(
        &self,
        class_id: ClassListId,
        teacher_ids: &[UserProfileId],
    ) -> RepositoryResult<usize>;
    /// Inserts the class and assigns its teachers in one transaction.
    fn create_class_with_teachers(
        &self,
        new_class: &NewClassList,
        teacher_ids: &[UserProfileId],
    ) -> RepositoryResult<ClassList>;
    fn create_course_record(&self, new_record: &NewCourseRecord)
    -> RepositoryResult<CourseRecord>;
    fn update_course_record(
        &self,
        record_id: CourseRecordId,
        updates: &NewCourseRecord,
    ) -> RepositoryResult<CourseRecord>;
    fn delete_course_record(&self, record_id: CourseRecordId) -> RepositoryResult<()>;
}

pub trait EnrollmentReader {
    fn get_enrollment_by_id(&self, id: EnrollmentId) -> RepositoryResult<Option<Enrollment>>;
    fn list_enrollments(&self, query: EnrollmentListQuery) -> RepositoryResult<Vec<Enrollment>>;
    fn get_study_record_by_id(&self, id: StudyRecordId)
    -> RepositoryResult<Option<StudyRecord>>;
    fn list_study_records(&self, query: StudyRecordListQuery)
    -> RepositoryResult<Vec<StudyRecord>>;
}

pub trait EnrollmentWriter {
    fn create_enrollment(&self, new_enrollment: &NewEnrollment) -> RepositoryResult<Enrollment>;
    fn update_enrollment(
        &self,
        enrollment_id: EnrollmentId,
        updates: &UpdateEnrollment,
    ) -> RepositoryResult<Enrollment>;
    fn delete_enrollment(&self, enrollment_id: EnrollmentId) -> RepositoryResult<()>;
    fn create_study_record(&self, new_record: &NewStudyRecord) -> RepositoryResult<StudyRecord>;
    fn update_study_record(
        &self,
        record_id: StudyRecordId,
        updates: &UpdateStudyRecord,
    ) -> RepositoryResult<StudyRecord>;
    fn delete_study_record(&self, record_id: StudyRecordId) -> RepositoryResult<()>;
}

pub trait PaymentReader {
    fn get_payment_by_id(&self, id: PaymentId) -> RepositoryResult<Option<Payment>>;
    /// Payments of a customer, newest first.
    fn list_payments(&self, customer_id: CustomerId) -> RepositoryResult<Vec<Payment>>;
}

pub trait PaymentWriter {
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
    fn update_payment(
        &self,
        payment_id: PaymentId,
        updates: &NewPayment,
    ) -> RepositoryResult<Payment>;
    fn delete_payment(&self, payment_id: PaymentId) -> RepositoryResult<()>;
}

pub trait UserProfileReader {
    fn get_user_profile_by_id(&self, id: UserProfileId) -> RepositoryResult<Option<UserProfile>>;
    fn get_user_profile_by_user_id(
        &self,
        user_id: AuthUserId,
    ) -> RepositoryResult<Option<UserProfile>>;
    fn list_user_profiles(&self) -> RepositoryResult<Vec<UserProfile>>;
    fn list_user_roles(&self, profile_id: UserProfileId) -> RepositoryResult<Vec<Role>>;
    /// Union of the menus granted by every role of the profile, ordered by id.
    fn list_menus_for_user(&self, profile_id: UserProfileId) -> RepositoryResult<Vec<Menu>>;
}

pub trait UserProfileWriter {
    fn create_user_profile(&self, new_profile: &NewUserProfile) -> RepositoryResult<UserProfile>;
    fn update_user_profile(
        &self,
        profile_id: UserProfileId,
        updates: &NewUserProfile,
    ) -> RepositoryResult<UserProfile>;
    fn delete_user_profile(&self, profile_id: UserProfileId) -> RepositoryResult<()>;
    fn set_user_roles(&self, profile_id: UserProfileId, role_ids: &[RoleId])
    -> RepositoryResult<usize>;
}

pub trait RoleReader {
    fn get_role_by_id(&self, id: RoleId) -> RepositoryResult<Option<Role>>;
    fn get_menu_by_id(&self, id: MenuId) -> RepositoryResult<Option<Menu>>;
    fn list_roles(&self) -> RepositoryResult<Vec<Role>>;
    fn list_menus(&self) -> RepositoryResult<Vec<Menu>>;
    fn list_role_menus(&self, role_id: RoleId) -> RepositoryResult<Vec<Menu>>;
}

pub trait RoleWriter {
    fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role>;
    fn update_role(&self, role_id: RoleId, updates: &NewRole) -> RepositoryResult<Role>;
    fn delete_role(&self, role_id: RoleId) -> RepositoryResult<()>;
    fn create_menu(&self, new_menu: &NewMenu) -> RepositoryResult<Menu>;
    fn update_menu(&self, menu_id: MenuId, updates: &NewMenu) -> RepositoryResult<Menu>;
    fn delete_menu(&self, menu_id: MenuId) -> RepositoryResult<()>;
    fn set_role_menus(&self, role_id: RoleId, menu_ids: &[MenuId]) -> RepositoryResult<usize>;
}
