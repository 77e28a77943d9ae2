use crate::domain::payment::{NewPayment, Payment};
use crate::forms::payment::PaymentForm;
use crate::repository::{CustomerReader, PaymentWriter};
use crate::services::{ServiceError, ServiceResult};

/// Records a tuition payment from an existing customer.
pub fn record_payment<R>(repo: &R, form: PaymentForm) -> ServiceResult<Payment>
where
    R: CustomerReader + PaymentWriter + ?Sized,
{
    let new_payment: NewPayment = form.try_into()?;

    if repo.get_customer_by_id(new_payment.customer_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let payment = repo.create_payment(&new_payment).map_err(|err| {
        log::error!(
            "Failed to record payment for customer {}: {err}",
            new_payment.customer_id
        );
        err
    })?;

    log::info!(
        "Recorded payment {} of {} from customer {}",
        payment.id,
        payment.amount,
        payment.customer_id
    );

    Ok(payment)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::choices::LeadSource;
    use crate::domain::customer::Customer;
    use crate::domain::types::{
        CourseId, CustomerQq, PaymentAmount, PaymentId, FreeText, UserProfileId,
    };
    use crate::repository::mock::MockRepository;

    fn midnight(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid timestamp")
    }

    fn form() -> PaymentForm {
        PaymentForm {
            customer_id: 1,
            amount: None,
            course_id: 1,
            consultant_id: 1,
        }
    }

    #[test]
    fn payment_for_missing_customer_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));
        repo.expect_create_payment().never();

        assert!(matches!(
            record_payment(&repo, form()),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn payment_is_stored_with_default_amount() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|id| {
            Ok(Some(Customer {
                id,
                name: None,
                qq: CustomerQq::new("10086").expect("valid qq"),
                qq_name: None,
                phone: None,
                source: LeadSource::Website,
                referral_from: None,
                consult_course_id: CourseId::new(1).expect("valid id"),
                content: FreeText::new("试听").expect("valid content"),
                consultant_id: UserProfileId::new(1).expect("valid id"),
                note: None,
                date: midnight(1),
            }))
        });
        repo.expect_create_payment()
            .withf(|payment| payment.amount.get() == PaymentAmount::DEFAULT)
            .returning(|payment| {
                Ok(Payment {
                    id: PaymentId::new(1).expect("valid id"),
                    customer_id: payment.customer_id,
                    amount: payment.amount,
                    course_id: payment.course_id,
                    consultant_id: payment.consultant_id,
                    date: midnight(2),
                })
            });

        let payment = record_payment(&repo, form()).expect("payment recorded");
        assert_eq!(payment.amount.get(), 500);
    }
}
