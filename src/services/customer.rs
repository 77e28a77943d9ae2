//! Lead registration, follow-ups and customer lifecycle.

use serde::Serialize;

use crate::domain::customer::{Customer, CustomerDependents, Tag};
use crate::domain::follow_up::{CustomerFollowUp, NewCustomerFollowUp};
use crate::domain::payment::Payment;
use crate::domain::types::CustomerId;
use crate::forms::customer::{CustomerForm, CustomerPayload, FollowUpForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, FollowUpReader, FollowUpWriter,
    PaymentReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Everything shown on a customer's detail page.
#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub tags: Vec<Tag>,
    pub follow_ups: Vec<CustomerFollowUp>,
    pub payments: Vec<Payment>,
}

/// Validates the form and stores a new lead with its tags.
///
/// A QQ id already on file is reported as [`ServiceError::Conflict`], as is
/// an unknown tag id; in that case no customer row is kept.
pub fn register_lead<R>(repo: &R, form: CustomerForm) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let payload = CustomerPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate lead form: {err}");
        ServiceError::from(err)
    })?;

    if repo.get_customer_by_qq(&payload.customer.qq)?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "customer with QQ {} already exists",
            payload.customer.qq
        )));
    }

    let customer = repo
        .create_customer_with_tags(&payload.customer, &payload.tags)
        .map_err(|err| {
            log::error!("Failed to create customer: {err}");
            err
        })?;

    log::info!(
        "Registered lead {} (QQ {}) for consultant {}",
        customer.id,
        customer.qq,
        customer.consultant_id
    );

    Ok(customer)
}

/// Replaces the mutable columns and the tag set of an existing customer.
pub fn update_customer<R>(
    repo: &R,
    customer_id: CustomerId,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let payload = CustomerPayload::try_from(form)?;

    repo.update_customer_with_tags(customer_id, &payload.customer, &payload.tags)
        .map_err(|err| {
            log::error!("Failed to update customer {customer_id}: {err}");
            ServiceError::from(err)
        })
}

/// Loads one page of customers matching the query filters.
pub fn list_customers<R>(
    repo: &R,
    query: CustomerListQuery,
    page: usize,
) -> ServiceResult<Paginated<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let page = page.max(1);
    let (total, customers) = repo.list_customers(query.paginate(page, DEFAULT_ITEMS_PER_PAGE))?;

    Ok(Paginated::new(
        customers,
        total,
        page,
        DEFAULT_ITEMS_PER_PAGE,
    ))
}

pub fn load_customer_detail<R>(repo: &R, customer_id: CustomerId) -> ServiceResult<CustomerDetail>
where
    R: CustomerReader + FollowUpReader + PaymentReader + ?Sized,
{
    let customer = repo
        .get_customer_by_id(customer_id)?
        .ok_or(ServiceError::NotFound)?;

    let tags = repo.list_customer_tags(customer_id)?;
    let follow_ups = repo.list_follow_ups(customer_id)?;
    let payments = repo.list_payments(customer_id)?;

    Ok(CustomerDetail {
        customer,
        tags,
        follow_ups,
        payments,
    })
}

/// Records a consultant's contact with an existing customer.
pub fn record_follow_up<R>(repo: &R, form: FollowUpForm) -> ServiceResult<CustomerFollowUp>
where
    R: CustomerReader + FollowUpWriter + ?Sized,
{
    let follow_up = NewCustomerFollowUp::try_from(form)?;

    if repo.get_customer_by_id(follow_up.customer_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.create_follow_up(&follow_up).map_err(|err| {
        log::error!(
            "Failed to record follow-up for customer {}: {err}",
            follow_up.customer_id
        );
        ServiceError::from(err)
    })
}

/// Deletes a customer and reports what the cascade removed with it.
pub fn delete_customer<R>(repo: &R, customer_id: CustomerId) -> ServiceResult<CustomerDependents>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let dependents = repo.count_customer_dependents(customer_id)?;

    repo.delete_customer(customer_id).map_err(|err| {
        log::error!("Failed to delete customer {customer_id}: {err}");
        err
    })?;

    log::info!(
        "Deleted customer {customer_id} with {} follow-ups, {} enrollments, {} study records and {} payments",
        dependents.follow_ups,
        dependents.enrollments,
        dependents.study_records,
        dependents.payments
    );

    Ok(dependents)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::choices::LeadSource;
    use crate::domain::customer::NewCustomer;
    use crate::domain::types::{CustomerQq, FollowUpId, TagId};
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp")
    }

    fn materialize(id: i32, new: &NewCustomer) -> Customer {
        Customer {
            id: CustomerId::new(id).expect("valid id"),
            name: new.name.clone(),
            qq: new.qq.clone(),
            qq_name: new.qq_name.clone(),
            phone: new.phone.clone(),
            source: new.source,
            referral_from: new.referral_from.clone(),
            consult_course_id: new.consult_course_id,
            content: new.content.clone(),
            consultant_id: new.consultant_id,
            note: new.note.clone(),
            date: timestamp(),
        }
    }

    #[derive(Default)]
    struct FakeRepo {
        customers: RefCell<Vec<Customer>>,
        tags: RefCell<Vec<(CustomerId, TagId)>>,
        follow_ups: RefCell<Vec<CustomerFollowUp>>,
    }

    impl CustomerReader for FakeRepo {
        fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
            Ok(self.customers.borrow().iter().find(|c| c.id == id).cloned())
        }

        fn get_customer_by_qq(&self, qq: &CustomerQq) -> RepositoryResult<Option<Customer>> {
            Ok(self.customers.borrow().iter().find(|c| &c.qq == qq).cloned())
        }

        fn list_customers(
            &self,
            query: CustomerListQuery,
        ) -> RepositoryResult<(usize, Vec<Customer>)> {
            let matching: Vec<Customer> = self
                .customers
                .borrow()
                .iter()
                .filter(|c| query.source.is_none_or(|s| c.source == s))
                .cloned()
                .collect();
            Ok((matching.len(), matching))
        }

        fn list_customer_tags(&self, _customer_id: CustomerId) -> RepositoryResult<Vec<Tag>> {
            Ok(Vec::new())
        }

        fn count_customer_dependents(
            &self,
            customer_id: CustomerId,
        ) -> RepositoryResult<CustomerDependents> {
            Ok(CustomerDependents {
                follow_ups: self
                    .follow_ups
                    .borrow()
                    .iter()
                    .filter(|f| f.customer_id == customer_id)
                    .count(),
                ..CustomerDependents::default()
            })
        }
    }

    impl CustomerWriter for FakeRepo {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
            let mut customers = self.customers.borrow_mut();
            let customer = materialize(customers.len() as i32 + 1, new_customer);
            customers.push(customer.clone());
            Ok(customer)
        }

        fn update_customer(
            &self,
            customer_id: CustomerId,
            updates: &NewCustomer,
        ) -> RepositoryResult<Customer> {
            let mut customers = self.customers.borrow_mut();
            let existing = customers
                .iter_mut()
                .find(|c| c.id == customer_id)
                .ok_or(RepositoryError::NotFound)?;
            let date = existing.date;
            *existing = materialize(customer_id.get(), updates);
            existing.date = date;
            Ok(existing.clone())
        }

        fn delete_customer(&self, customer_id: CustomerId) -> RepositoryResult<()> {
            let mut customers = self.customers.borrow_mut();
            let before = customers.len();
            customers.retain(|c| c.id != customer_id);
            if customers.len() == before {
                return Err(RepositoryError::NotFound);
            }
            self.follow_ups
                .borrow_mut()
                .retain(|f| f.customer_id != customer_id);
            Ok(())
        }

        fn set_customer_tags(
            &self,
            customer_id: CustomerId,
            tag_ids: &[TagId],
        ) -> RepositoryResult<usize> {
            let mut tags = self.tags.borrow_mut();
            tags.retain(|(c, _)| *c != customer_id);
            tags.extend(tag_ids.iter().map(|t| (customer_id, *t)));
            Ok(tag_ids.len())
        }

        fn create_customer_with_tags(
            &self,
            new_customer: &NewCustomer,
            tag_ids: &[TagId],
        ) -> RepositoryResult<Customer> {
            let customer = self.create_customer(new_customer)?;
            self.set_customer_tags(customer.id, tag_ids)?;
            Ok(customer)
        }

        fn update_customer_with_tags(
            &self,
            customer_id: CustomerId,
            updates: &NewCustomer,
            tag_ids: &[TagId],
        ) -> RepositoryResult<Customer> {
            let customer = self.update_customer(customer_id, updates)?;
            self.set_customer_tags(customer_id, tag_ids)?;
            Ok(customer)
        }
    }

    impl FollowUpWriter for FakeRepo {
        fn create_follow_up(
            &self,
            follow_up: &NewCustomerFollowUp,
        ) -> RepositoryResult<CustomerFollowUp> {
            let mut follow_ups = self.follow_ups.borrow_mut();
            let stored = CustomerFollowUp {
                id: FollowUpId::new(follow_ups.len() as i32 + 1).expect("valid id"),
                customer_id: follow_up.customer_id,
                content: follow_up.content.clone(),
                consultant_id: follow_up.consultant_id,
                intention: follow_up.intention,
                date: timestamp(),
            };
            follow_ups.push(stored.clone());
            Ok(stored)
        }

        fn update_follow_up(
            &self,
            follow_up_id: FollowUpId,
            updates: &NewCustomerFollowUp,
        ) -> RepositoryResult<CustomerFollowUp> {
            let mut follow_ups = self.follow_ups.borrow_mut();
            let existing = follow_ups
                .iter_mut()
                .find(|f| f.id == follow_up_id)
                .ok_or(RepositoryError::NotFound)?;
            existing.content = updates.content.clone();
            existing.consultant_id = updates.consultant_id;
            existing.intention = updates.intention;
            Ok(existing.clone())
        }

        fn delete_follow_up(&self, follow_up_id: FollowUpId) -> RepositoryResult<()> {
            let mut follow_ups = self.follow_ups.borrow_mut();
            let before = follow_ups.len();
            follow_ups.retain(|f| f.id != follow_up_id);
            if follow_ups.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    fn lead_form(qq: &str) -> CustomerForm {
        CustomerForm {
            name: Some("王同学".to_string()),
            qq: qq.to_string(),
            qq_name: None,
            phone: Some("13800000000".to_string()),
            source: 1,
            referral_from: None,
            consult_course_id: 1,
            content: "咨询 Python 全栈".to_string(),
            consultant_id: 1,
            note: None,
            tags: vec![2, 1],
        }
    }

    fn follow_up_form(customer_id: i32) -> FollowUpForm {
        FollowUpForm {
            customer_id,
            content: "电话回访".to_string(),
            consultant_id: 1,
            intention: 2,
        }
    }

    #[test]
    fn register_lead_stores_customer_and_tags() {
        let repo = FakeRepo::default();

        let customer = register_lead(&repo, lead_form("123456")).expect("lead registered");

        assert_eq!(customer.source, LeadSource::QqGroup);
        assert_eq!(repo.customers.borrow().len(), 1);
        let tags: Vec<i32> = repo.tags.borrow().iter().map(|(_, t)| t.get()).collect();
        assert_eq!(tags, vec![1, 2]);
    }

    #[test]
    fn register_lead_rejects_duplicate_qq() {
        let repo = FakeRepo::default();
        register_lead(&repo, lead_form("123456")).expect("first lead registered");

        let result = register_lead(&repo, lead_form("123456"));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(repo.customers.borrow().len(), 1);
    }

    #[test]
    fn register_lead_rejects_invalid_form() {
        let repo = FakeRepo::default();
        let mut form = lead_form("123456");
        form.source = 9;

        let result = register_lead(&repo, form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(repo.customers.borrow().is_empty());
    }

    #[test]
    fn update_customer_keeps_creation_date() {
        let repo = FakeRepo::default();
        let customer = register_lead(&repo, lead_form("123456")).expect("lead registered");

        let mut form = lead_form("654321");
        form.tags = Vec::new();
        let updated = update_customer(&repo, customer.id, form).expect("customer updated");

        assert_eq!(updated.qq.as_str(), "654321");
        assert_eq!(updated.date, customer.date);
        assert!(repo.tags.borrow().is_empty());
    }

    #[test]
    fn record_follow_up_requires_existing_customer() {
        let repo = FakeRepo::default();

        let result = record_follow_up(&repo, follow_up_form(42));

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert!(repo.follow_ups.borrow().is_empty());
    }

    #[test]
    fn delete_customer_reports_removed_dependents() {
        let repo = FakeRepo::default();
        let customer = register_lead(&repo, lead_form("123456")).expect("lead registered");
        record_follow_up(&repo, follow_up_form(customer.id.get())).expect("follow-up stored");
        record_follow_up(&repo, follow_up_form(customer.id.get())).expect("follow-up stored");

        let dependents = delete_customer(&repo, customer.id).expect("customer deleted");

        assert_eq!(dependents.follow_ups, 2);
        assert!(repo.customers.borrow().is_empty());
        assert!(repo.follow_ups.borrow().is_empty());
    }

    #[test]
    fn list_customers_paginates_results() {
        let repo = FakeRepo::default();
        register_lead(&repo, lead_form("1")).expect("lead registered");
        register_lead(&repo, lead_form("2")).expect("lead registered");

        let page = list_customers(&repo, CustomerListQuery::new(), 0).expect("listing");

        assert_eq!(page.page, 1);
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pages, vec![Some(1)]);
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[test]
    fn delete_missing_customer_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_count_customer_dependents()
            .returning(|_| Ok(CustomerDependents::default()));
        repo.expect_delete_customer()
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_customer(&repo, CustomerId::new(7).expect("valid id"));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn detail_of_missing_customer_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));
        repo.expect_list_follow_ups().never();

        let result = load_customer_detail(&repo, CustomerId::new(7).expect("valid id"));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
