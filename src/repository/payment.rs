use diesel::prelude::*;

use crate::domain::payment::{NewPayment, Payment};
use crate::domain::types::{CustomerId, PaymentId};
use crate::models::payment::{NewPayment as DbNewPayment, Payment as DbPayment};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, PaymentReader, PaymentWriter, expect_deleted, into_domain,
};

impl PaymentReader for DieselRepository {
    fn get_payment_by_id(&self, id: PaymentId) -> RepositoryResult<Option<Payment>> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let payment = payments::table
            .find(id.get())
            .first::<DbPayment>(&mut conn)
            .optional()?;

        payment
            .map(|p| Payment::try_from(p).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_payments(&self, customer_id: CustomerId) -> RepositoryResult<Vec<Payment>> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let rows = payments::table
            .filter(payments::customer_id.eq(customer_id.get()))
            .order((payments::date.desc(), payments::id.desc()))
            .load::<DbPayment>(&mut conn)?;

        into_domain(rows)
    }
}

impl PaymentWriter for DieselRepository {
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let insertable: DbNewPayment = new_payment.into();

        let row = diesel::insert_into(payments::table)
            .values(&insertable)
            .get_result::<DbPayment>(&mut conn)?;

        Payment::try_from(row).map_err(RepositoryError::from)
    }

    fn update_payment(
        &self,
        payment_id: PaymentId,
        updates: &NewPayment,
    ) -> RepositoryResult<Payment> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let changeset: DbNewPayment = updates.into();

        let row = diesel::update(payments::table.find(payment_id.get()))
            .set(&changeset)
            .get_result::<DbPayment>(&mut conn)?;

        Payment::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_payment(&self, payment_id: PaymentId) -> RepositoryResult<()> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let affected = diesel::delete(payments::table.find(payment_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }
}
