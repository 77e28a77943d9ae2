//! Forms for registering leads and recording follow-ups.

use serde::Deserialize;
use validator::Validate;

use crate::domain::choices::{IntentionStatus, LeadSource};
use crate::domain::customer::NewCustomer;
use crate::domain::follow_up::NewCustomerFollowUp;
use crate::domain::types::{
    ContactPhone, CourseId, CustomerId, CustomerName, CustomerQq, QqName, ReferralName,
    FreeText, TagId, UserProfileId,
};
use crate::forms::{FormError, invalid, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing a customer.
pub struct CustomerForm {
    #[validate(length(max = 32))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub qq: String,
    #[validate(length(max = 64))]
    pub qq_name: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    pub source: i16,
    #[validate(length(max = 64))]
    pub referral_from: Option<String>,
    pub consult_course_id: i32,
    #[validate(length(min = 1))]
    pub content: String,
    pub consultant_id: i32,
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<i32>,
}

/// Customer values together with the tags to attach.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerPayload {
    pub customer: NewCustomer,
    pub tags: Vec<TagId>,
}

impl TryFrom<CustomerForm> for CustomerPayload {
    type Error = FormError;

    fn try_from(form: CustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let mut customer = NewCustomer::new(
            CustomerQq::new(form.qq).map_err(invalid("qq"))?,
            LeadSource::try_from(form.source).map_err(invalid("source"))?,
            CourseId::new(form.consult_course_id).map_err(invalid("consult_course_id"))?,
            FreeText::new(form.content).map_err(invalid("content"))?,
            UserProfileId::new(form.consultant_id).map_err(invalid("consultant_id"))?,
        );

        if let Some(name) = non_blank(form.name) {
            customer = customer.name(CustomerName::new(name).map_err(invalid("name"))?);
        }
        if let Some(qq_name) = non_blank(form.qq_name) {
            customer = customer.qq_name(QqName::new(qq_name).map_err(invalid("qq_name"))?);
        }
        if let Some(phone) = non_blank(form.phone) {
            customer = customer.phone(ContactPhone::new(phone).map_err(invalid("phone"))?);
        }
        if let Some(referral) = non_blank(form.referral_from) {
            customer = customer
                .referral_from(ReferralName::new(referral).map_err(invalid("referral_from"))?);
        }
        if let Some(note) = FreeText::optional(form.note) {
            customer = customer.note(note);
        }

        let mut tags = form
            .tags
            .into_iter()
            .map(|id| TagId::new(id).map_err(invalid("tags")))
            .collect::<Result<Vec<_>, _>>()?;
        tags.sort_unstable();
        tags.dedup();

        Ok(Self { customer, tags })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for logging contact with a customer.
pub struct FollowUpForm {
    pub customer_id: i32,
    #[validate(length(min = 1))]
    pub content: String,
    pub consultant_id: i32,
    pub intention: i16,
}

impl TryFrom<FollowUpForm> for NewCustomerFollowUp {
    type Error = FormError;

    fn try_from(form: FollowUpForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewCustomerFollowUp::new(
            CustomerId::new(form.customer_id).map_err(invalid("customer_id"))?,
            FreeText::new(form.content).map_err(invalid("content"))?,
            UserProfileId::new(form.consultant_id).map_err(invalid("consultant_id"))?,
            IntentionStatus::try_from(form.intention).map_err(invalid("intention"))?,
        ))
    }
}
