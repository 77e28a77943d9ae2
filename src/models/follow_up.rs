//! Diesel models for customer follow-ups.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::choices::IntentionStatus;
use crate::domain::follow_up::{
    CustomerFollowUp as DomainFollowUp, NewCustomerFollowUp as DomainNewFollowUp,
};
use crate::domain::types::{
    CustomerId, FollowUpId, FreeText, TypeConstraintError, UserProfileId,
};
use crate::models::customer::Customer;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(table_name = crate::schema::customer_follow_ups)]
pub struct CustomerFollowUp {
    pub id: i32,
    pub customer_id: i32,
    pub content: String,
    pub consultant_id: i32,
    pub intention: i16,
    pub date: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::customer_follow_ups)]
pub struct NewCustomerFollowUp<'a> {
    pub customer_id: i32,
    pub content: &'a str,
    pub consultant_id: i32,
    pub intention: i16,
}

impl TryFrom<CustomerFollowUp> for DomainFollowUp {
    type Error = TypeConstraintError;

    fn try_from(follow_up: CustomerFollowUp) -> Result<Self, Self::Error> {
        Ok(Self {
            id: FollowUpId::try_from(follow_up.id)?,
            customer_id: CustomerId::try_from(follow_up.customer_id)?,
            content: FreeText::new(follow_up.content)?,
            consultant_id: UserProfileId::try_from(follow_up.consultant_id)?,
            intention: IntentionStatus::try_from(follow_up.intention)?,
            date: follow_up.date,
        })
    }
}

impl<'a> From<&'a DomainNewFollowUp> for NewCustomerFollowUp<'a> {
    fn from(follow_up: &'a DomainNewFollowUp) -> Self {
        Self {
            customer_id: follow_up.customer_id.get(),
            content: follow_up.content.as_str(),
            consultant_id: follow_up.consultant_id.get(),
            intention: follow_up.intention.value(),
        }
    }
}
