use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::choices::IntentionStatus;
use crate::domain::types::{CustomerId, FollowUpId, FreeText, UserProfileId};

/// A logged interaction between a consultant and a customer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomerFollowUp {
    pub id: FollowUpId,
    pub customer_id: CustomerId,
    pub content: FreeText,
    pub consultant_id: UserProfileId,
    pub intention: IntentionStatus,
    pub date: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewCustomerFollowUp {
    pub customer_id: CustomerId,
    pub content: FreeText,
    pub consultant_id: UserProfileId,
    pub intention: IntentionStatus,
}

impl NewCustomerFollowUp {
    #[must_use]
    pub fn new(
        customer_id: CustomerId,
        content: FreeText,
        consultant_id: UserProfileId,
        intention: IntentionStatus,
    ) -> Self {
        Self {
            customer_id,
            content,
            consultant_id,
            intention,
        }
    }
}
