use serde::Deserialize;
use validator::Validate;

use crate::domain::payment::NewPayment;
use crate::domain::types::{CourseId, CustomerId, PaymentAmount, UserProfileId};
use crate::forms::{FormError, invalid};

#[derive(Debug, Deserialize, Validate)]
/// Form data for a tuition payment. A missing amount falls back to the
/// standard fee.
pub struct PaymentForm {
    pub customer_id: i32,
    #[validate(range(min = 0))]
    pub amount: Option<i32>,
    pub course_id: i32,
    pub consultant_id: i32,
}

impl TryFrom<PaymentForm> for NewPayment {
    type Error = FormError;

    fn try_from(form: PaymentForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let payment = NewPayment::new(
            CustomerId::new(form.customer_id).map_err(invalid("customer_id"))?,
            CourseId::new(form.course_id).map_err(invalid("course_id"))?,
            UserProfileId::new(form.consultant_id).map_err(invalid("consultant_id"))?,
        );

        match form.amount {
            Some(amount) => {
                let amount = PaymentAmount::new(amount).map_err(invalid("amount"))?;
                Ok(payment.amount(amount))
            }
            None => Ok(payment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_amount_defaults_to_standard_fee() {
        let form: PaymentForm =
            serde_json::from_str(r#"{"customer_id":1,"course_id":2,"consultant_id":3}"#)
                .expect("valid json");

        let payment = NewPayment::try_from(form).expect("valid payment");
        assert_eq!(payment.amount.get(), PaymentAmount::DEFAULT);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let form = PaymentForm {
            customer_id: 1,
            amount: Some(-1),
            course_id: 2,
            consultant_id: 3,
        };

        assert!(matches!(
            NewPayment::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
