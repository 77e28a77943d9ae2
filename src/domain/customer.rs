use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::choices::LeadSource;
use crate::domain::types::{
    ContactPhone, CourseId, CustomerId, CustomerName, CustomerQq, QqName, ReferralName,
    FreeText, TagId, TagName, UserProfileId,
};

/// A lead: a prospective student and the consultant looking after them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: Option<CustomerName>,
    pub qq: CustomerQq,
    pub qq_name: Option<QqName>,
    pub phone: Option<ContactPhone>,
    pub source: LeadSource,
    pub referral_from: Option<ReferralName>,
    /// Course the lead asked about.
    pub consult_course_id: CourseId,
    /// Details of the initial inquiry.
    pub content: FreeText,
    pub consultant_id: UserProfileId,
    pub note: Option<FreeText>,
    /// Set by the store on insert.
    pub date: NaiveDateTime,
}

/// Values written when creating a customer, or replacing its mutable columns.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewCustomer {
    pub name: Option<CustomerName>,
    pub qq: CustomerQq,
    pub qq_name: Option<QqName>,
    pub phone: Option<ContactPhone>,
    pub source: LeadSource,
    pub referral_from: Option<ReferralName>,
    pub consult_course_id: CourseId,
    pub content: FreeText,
    pub consultant_id: UserProfileId,
    pub note: Option<FreeText>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        qq: CustomerQq,
        source: LeadSource,
        consult_course_id: CourseId,
        content: FreeText,
        consultant_id: UserProfileId,
    ) -> Self {
        Self {
            name: None,
            qq,
            qq_name: None,
            phone: None,
            source,
            referral_from: None,
            consult_course_id,
            content,
            consultant_id,
            note: None,
        }
    }

    #[must_use]
    pub fn name(mut self, name: CustomerName) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub fn qq_name(mut self, qq_name: QqName) -> Self {
        self.qq_name = Some(qq_name);
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: ContactPhone) -> Self {
        self.phone = Some(phone);
        self
    }

    #[must_use]
    pub fn referral_from(mut self, referral_from: ReferralName) -> Self {
        self.referral_from = Some(referral_from);
        self
    }

    #[must_use]
    pub fn note(mut self, note: FreeText) -> Self {
        self.note = Some(note);
        self
    }
}

impl From<&Customer> for NewCustomer {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            qq: customer.qq.clone(),
            qq_name: customer.qq_name.clone(),
            phone: customer.phone.clone(),
            source: customer.source,
            referral_from: customer.referral_from.clone(),
            consult_course_id: customer.consult_course_id,
            content: customer.content.clone(),
            consultant_id: customer.consultant_id,
            note: customer.note.clone(),
        }
    }
}

/// Label attached to customers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewTag {
    pub name: TagName,
}

impl NewTag {
    #[must_use]
    pub fn new(name: TagName) -> Self {
        Self { name }
    }
}

/// Rows that deleting a customer removes along with it.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CustomerDependents {
    pub follow_ups: usize,
    pub enrollments: usize,
    pub study_records: usize,
    pub payments: usize,
}

impl CustomerDependents {
    pub fn total(&self) -> usize {
        self.follow_ups + self.enrollments + self.study_records + self.payments
    }
}
