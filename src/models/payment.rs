use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::payment::{NewPayment as DomainNewPayment, Payment as DomainPayment};
use crate::domain::types::{
    CourseId, CustomerId, PaymentAmount, PaymentId, TypeConstraintError, UserProfileId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::payments)]
pub struct Payment {
    pub id: i32,
    pub customer_id: i32,
    pub amount: i32,
    pub course_id: i32,
    pub consultant_id: i32,
    pub date: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment {
    pub customer_id: i32,
    pub amount: i32,
    pub course_id: i32,
    pub consultant_id: i32,
}

impl TryFrom<Payment> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from(payment: Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PaymentId::try_from(payment.id)?,
            customer_id: CustomerId::try_from(payment.customer_id)?,
            amount: PaymentAmount::try_from(payment.amount)?,
            course_id: CourseId::try_from(payment.course_id)?,
            consultant_id: UserProfileId::try_from(payment.consultant_id)?,
            date: payment.date,
        })
    }
}

impl From<&DomainNewPayment> for NewPayment {
    fn from(payment: &DomainNewPayment) -> Self {
        Self {
            customer_id: payment.customer_id.get(),
            amount: payment.amount.get(),
            course_id: payment.course_id.get(),
            consultant_id: payment.consultant_id.get(),
        }
    }
}
