use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CourseId, CustomerId, PaymentAmount, PaymentId, UserProfileId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub customer_id: CustomerId,
    pub amount: PaymentAmount,
    pub course_id: CourseId,
    pub consultant_id: UserProfileId,
    pub date: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewPayment {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub amount: PaymentAmount,
    pub course_id: CourseId,
    pub consultant_id: UserProfileId,
}

impl NewPayment {
    /// Creates a payment of the default amount.
    #[must_use]
    pub fn new(customer_id: CustomerId, course_id: CourseId, consultant_id: UserProfileId) -> Self {
        Self {
            customer_id,
            amount: PaymentAmount::default(),
            course_id,
            consultant_id,
        }
    }

    #[must_use]
    pub fn amount(mut self, amount: PaymentAmount) -> Self {
        self.amount = amount;
        self
    }
}
