//! Mock repository implementations for isolating services in tests.

use mockall::mock;

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
    EnrollmentId, FollowUpId, MenuId, PaymentId, RoleId, StudyRecordId, TagId, TagName, UserProfileId,
};
use crate::domain::user_profile::{Menu, NewMenu, NewRole, NewUserProfile, Role, UserProfile};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClassListQuery, ClassListReader, ClassListWriter, CourseReader, CourseWriter,
    CustomerListQuery, CustomerReader, CustomerWriter, EnrollmentListQuery, EnrollmentReader,
    EnrollmentWriter, FollowUpReader, FollowUpWriter, PaymentReader, PaymentWriter, RoleReader,
    RoleWriter, StudyRecordListQuery, TagReader, TagWriter, UserProfileReader, UserProfileWriter,
};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
        fn get_customer_by_qq(&self, qq: &CustomerQq) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
        fn list_customer_tags(&self, customer_id: CustomerId) -> RepositoryResult<Vec<Tag>>;
        fn count_customer_dependents(&self, customer_id: CustomerId) -> RepositoryResult<CustomerDependents>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(&self, customer_id: CustomerId, updates: &NewCustomer) -> RepositoryResult<Customer>;
        fn delete_customer(&self, customer_id: CustomerId) -> RepositoryResult<()>;
        fn set_customer_tags(&self, customer_id: CustomerId, tag_ids: &[TagId]) -> RepositoryResult<usize>;
        fn create_customer_with_tags(&self, new_customer: &NewCustomer, tag_ids: &[TagId]) -> RepositoryResult<Customer>;
        fn update_customer_with_tags(&self, customer_id: CustomerId, updates: &NewCustomer, tag_ids: &[TagId]) -> RepositoryResult<Customer>;
    }

    impl TagReader for Repository {
        fn get_tag_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>>;
        fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
        fn get_tag_by_name(&self, name: &TagName) -> RepositoryResult<Option<Tag>>;
    }

    impl TagWriter for Repository {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
        fn update_tag(&self, tag_id: TagId, updates: &NewTag) -> RepositoryResult<Tag>;
        fn delete_tag(&self, tag_id: TagId) -> RepositoryResult<()>;
    }

    impl FollowUpReader for Repository {
        fn get_follow_up_by_id(&self, id: FollowUpId) -> RepositoryResult<Option<CustomerFollowUp>>;
        fn list_follow_ups(&self, customer_id: CustomerId) -> RepositoryResult<Vec<CustomerFollowUp>>;
    }

    impl FollowUpWriter for Repository {
        fn create_follow_up(&self, follow_up: &NewCustomerFollowUp) -> RepositoryResult<CustomerFollowUp>;
        fn update_follow_up(&self, follow_up_id: FollowUpId, updates: &NewCustomerFollowUp) -> RepositoryResult<CustomerFollowUp>;
        fn delete_follow_up(&self, follow_up_id: FollowUpId) -> RepositoryResult<()>;
    }

    impl CourseReader for Repository {
        fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>>;
        fn list_courses(&self) -> RepositoryResult<Vec<Course>>;
        fn get_branch_by_id(&self, id: BranchId) -> RepositoryResult<Option<Branch>>;
        fn list_branches(&self) -> RepositoryResult<Vec<Branch>>;
    }

    impl CourseWriter for Repository {
        fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course>;
        fn update_course(&self, course_id: CourseId, updates: &NewCourse) -> RepositoryResult<Course>;
        fn delete_course(&self, course_id: CourseId) -> RepositoryResult<()>;
        fn create_branch(&self, new_branch: &NewBranch) -> RepositoryResult<Branch>;
        fn update_branch(&self, branch_id: BranchId, updates: &NewBranch) -> RepositoryResult<Branch>;
        fn delete_branch(&self, branch_id: BranchId) -> RepositoryResult<()>;
    }

    impl ClassListReader for Repository {
        fn get_class_by_id(&self, id: ClassListId) -> RepositoryResult<Option<ClassList>>;
        fn list_classes(&self, query: ClassListQuery) -> RepositoryResult<Vec<ClassList>>;
        fn list_class_teachers(&self, class_id: ClassListId) -> RepositoryResult<Vec<UserProfile>>;
        fn get_course_record_by_id(&self, id: CourseRecordId) -> RepositoryResult<Option<CourseRecord>>;
        fn list_course_records(&self, class_id: ClassListId) -> RepositoryResult<Vec<CourseRecord>>;
    }

    impl ClassListWriter for Repository {
        fn create_class(&self, new_class: &NewClassList) -> RepositoryResult<ClassList>;
        fn update_class(&self, class_id: ClassListId, updates: &NewClassList) -> RepositoryResult<ClassList>;
        fn delete_class(&self, class_id: ClassListId) -> RepositoryResult<()>;
        fn set_class_teachers(&self, class_id: ClassListId, teacher_ids: &[UserProfileId]) -> RepositoryResult<usize>;
        fn create_class_with_teachers(&self, new_class: &NewClassList, teacher_ids: &[UserProfileId]) -> RepositoryResult<ClassList>;
        fn create_course_record(&self, new_record: &NewCourseRecord) -> RepositoryResult<CourseRecord>;
        fn update_course_record(&self, record_id: CourseRecordId, updates: &NewCourseRecord) -> RepositoryResult<CourseRecord>;
        fn delete_course_record(&self, record_id: CourseRecordId) -> RepositoryResult<()>;
    }

    impl EnrollmentReader for Repository {
        fn get_enrollment_by_id(&self, id: EnrollmentId) -> RepositoryResult<Option<Enrollment>>;
        fn list_enrollments(&self, query: EnrollmentListQuery) -> RepositoryResult<Vec<Enrollment>>;
        fn get_study_record_by_id(&self, id: StudyRecordId) -> RepositoryResult<Option<StudyRecord>>;
        fn list_study_records(&self, query: StudyRecordListQuery) -> RepositoryResult<Vec<StudyRecord>>;
    }

    impl EnrollmentWriter for Repository {
        fn create_enrollment(&self, new_enrollment: &NewEnrollment) -> RepositoryResult<Enrollment>;
        fn update_enrollment(&self, enrollment_id: EnrollmentId, updates: &UpdateEnrollment) -> RepositoryResult<Enrollment>;
        fn delete_enrollment(&self, enrollment_id: EnrollmentId) -> RepositoryResult<()>;
        fn create_study_record(&self, new_record: &NewStudyRecord) -> RepositoryResult<StudyRecord>;
        fn update_study_record(&self, record_id: StudyRecordId, updates: &UpdateStudyRecord) -> RepositoryResult<StudyRecord>;
        fn delete_study_record(&self, record_id: StudyRecordId) -> RepositoryResult<()>;
    }

    impl PaymentReader for Repository {
        fn get_payment_by_id(&self, id: PaymentId) -> RepositoryResult<Option<Payment>>;
        fn list_payments(&self, customer_id: CustomerId) -> RepositoryResult<Vec<Payment>>;
    }

    impl PaymentWriter for Repository {
        fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
        fn update_payment(&self, payment_id: PaymentId, updates: &NewPayment) -> RepositoryResult<Payment>;
        fn delete_payment(&self, payment_id: PaymentId) -> RepositoryResult<()>;
    }

    impl UserProfileReader for Repository {
        fn get_user_profile_by_id(&self, id: UserProfileId) -> RepositoryResult<Option<UserProfile>>;
        fn get_user_profile_by_user_id(&self, user_id: AuthUserId) -> RepositoryResult<Option<UserProfile>>;
        fn list_user_profiles(&self) -> RepositoryResult<Vec<UserProfile>>;
        fn list_user_roles(&self, profile_id: UserProfileId) -> RepositoryResult<Vec<Role>>;
        fn list_menus_for_user(&self, profile_id: UserProfileId) -> RepositoryResult<Vec<Menu>>;
    }

    impl UserProfileWriter for Repository {
        fn create_user_profile(&self, new_profile: &NewUserProfile) -> RepositoryResult<UserProfile>;
        fn update_user_profile(&self, profile_id: UserProfileId, updates: &NewUserProfile) -> RepositoryResult<UserProfile>;
        fn delete_user_profile(&self, profile_id: UserProfileId) -> RepositoryResult<()>;
        fn set_user_roles(&self, profile_id: UserProfileId, role_ids: &[RoleId]) -> RepositoryResult<usize>;
    }

    impl RoleReader for Repository {
        fn get_role_by_id(&self, id: RoleId) -> RepositoryResult<Option<Role>>;
        fn get_menu_by_id(&self, id: MenuId) -> RepositoryResult<Option<Menu>>;
        fn list_roles(&self) -> RepositoryResult<Vec<Role>>;
        fn list_menus(&self) -> RepositoryResult<Vec<Menu>>;
        fn list_role_menus(&self, role_id: RoleId) -> RepositoryResult<Vec<Menu>>;
    }

    impl RoleWriter for Repository {
        fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role>;
        fn update_role(&self, role_id: RoleId, updates: &NewRole) -> RepositoryResult<Role>;
        fn delete_role(&self, role_id: RoleId) -> RepositoryResult<()>;
        fn create_menu(&self, new_menu: &NewMenu) -> RepositoryResult<Menu>;
        fn update_menu(&self, menu_id: MenuId, updates: &NewMenu) -> RepositoryResult<Menu>;
        fn delete_menu(&self, menu_id: MenuId) -> RepositoryResult<()>;
        fn set_role_menus(&self, role_id: RoleId, menu_ids: &[MenuId]) -> RepositoryResult<usize>;
    }
}
