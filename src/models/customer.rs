//! Diesel models for customers, tags and their link table.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::choices::LeadSource;
use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer, Tag as DomainTag,
};
use crate::domain::types::{
    ContactPhone, CourseId, CustomerId, CustomerName, CustomerQq, QqName, ReferralName,
    FreeText, TagId, TagName, TypeConstraintError, UserProfileId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub name: Option<String>,
    pub qq: String,
    pub qq_name: Option<String>,
    pub phone: Option<String>,
    pub source: i16,
    pub referral_from: Option<String>,
    pub consult_course_id: i32,
    pub content: String,
    pub consultant_id: i32,
    pub note: Option<String>,
    pub date: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
/// Insertable form of [`Customer`], also used to replace its mutable columns.
pub struct NewCustomer<'a> {
    pub name: Option<&'a str>,
    pub qq: &'a str,
    pub qq_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub source: i16,
    pub referral_from: Option<&'a str>,
    pub consult_course_id: i32,
    pub content: &'a str,
    pub consultant_id: i32,
    pub note: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tags)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Associations, Identifiable, Insertable)]
#[diesel(primary_key(customer_id, tag_id))]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(belongs_to(Tag, foreign_key = tag_id))]
#[diesel(table_name = crate::schema::customer_tags)]
/// Association table linking customers to tags.
pub struct CustomerTag {
    pub customer_id: i32,
    pub tag_id: i32,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::try_from(customer.id)?,
            name: customer.name.map(CustomerName::new).transpose()?,
            qq: CustomerQq::new(customer.qq)?,
            qq_name: customer.qq_name.map(QqName::new).transpose()?,
            phone: customer.phone.map(ContactPhone::new).transpose()?,
            source: LeadSource::try_from(customer.source)?,
            referral_from: customer.referral_from.map(ReferralName::new).transpose()?,
            consult_course_id: CourseId::try_from(customer.consult_course_id)?,
            content: FreeText::new(customer.content)?,
            consultant_id: UserProfileId::try_from(customer.consultant_id)?,
            note: customer.note.map(FreeText::new).transpose()?,
            date: customer.date,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            name: customer.name.as_ref().map(CustomerName::as_str),
            qq: customer.qq.as_str(),
            qq_name: customer.qq_name.as_ref().map(QqName::as_str),
            phone: customer.phone.as_ref().map(ContactPhone::as_str),
            source: customer.source.value(),
            referral_from: customer.referral_from.as_ref().map(ReferralName::as_str),
            consult_course_id: customer.consult_course_id.get(),
            content: customer.content.as_str(),
            consultant_id: customer.consultant_id.get(),
            note: customer.note.as_ref().map(FreeText::as_str),
        }
    }
}

impl TryFrom<Tag> for DomainTag {
    type Error = TypeConstraintError;

    fn try_from(tag: Tag) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TagId::try_from(tag.id)?,
            name: TagName::new(tag.name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn db_customer(source: i16) -> Customer {
        Customer {
            id: 1,
            name: Some("张三".to_string()),
            qq: "10001".to_string(),
            qq_name: None,
            phone: Some("13800000000".to_string()),
            source,
            referral_from: None,
            consult_course_id: 2,
            content: "Asked about evening classes".to_string(),
            consultant_id: 3,
            note: None,
            date: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn customer_into_domain() {
        let domain = DomainCustomer::try_from(db_customer(4)).expect("valid customer");
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.source, LeadSource::Cto51);
        assert_eq!(domain.name.as_ref().map(CustomerName::as_str), Some("张三"));
        assert_eq!(domain.consult_course_id.get(), 2);
        assert_eq!(domain.consultant_id.get(), 3);
    }

    #[test]
    fn customer_with_unknown_source_is_rejected() {
        let result = DomainCustomer::try_from(db_customer(9));
        assert_eq!(
            result.err(),
            Some(TypeConstraintError::InvalidChoice {
                field: "lead source",
                value: 9
            })
        );
    }

    #[test]
    fn from_domain_new_creates_insertable() {
        let domain = DomainNewCustomer::new(
            CustomerQq::new("10002").expect("valid qq"),
            LeadSource::Website,
            CourseId::new(5).expect("valid course id"),
            FreeText::new("Wants a weekend class").expect("valid content"),
            UserProfileId::new(6).expect("valid profile id"),
        )
        .phone(ContactPhone::new("555-0101").expect("valid phone"));

        let new: NewCustomer = (&domain).into();
        assert_eq!(new.qq, "10002");
        assert_eq!(new.source, 2);
        assert_eq!(new.phone, Some("555-0101"));
        assert_eq!(new.name, None);
        assert_eq!(new.consult_course_id, 5);
        assert_eq!(new.consultant_id, 6);
    }
}
