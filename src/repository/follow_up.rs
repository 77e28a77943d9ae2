use diesel::prelude::*;

use crate::domain::follow_up::{CustomerFollowUp, NewCustomerFollowUp};
use crate::domain::types::{CustomerId, FollowUpId};
use crate::models::follow_up::{
    CustomerFollowUp as DbFollowUp, NewCustomerFollowUp as DbNewFollowUp,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, FollowUpReader, FollowUpWriter, expect_deleted, into_domain,
};

impl FollowUpReader for DieselRepository {
    fn get_follow_up_by_id(&self, id: FollowUpId) -> RepositoryResult<Option<CustomerFollowUp>> {
        use crate::schema::customer_follow_ups;

        let mut conn = self.conn()?;
        let follow_up = customer_follow_ups::table
            .find(id.get())
            .first::<DbFollowUp>(&mut conn)
            .optional()?;

        follow_up
            .map(|f| CustomerFollowUp::try_from(f).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_follow_ups(
        &self,
        customer_id: CustomerId,
    ) -> RepositoryResult<Vec<CustomerFollowUp>> {
        use crate::schema::customer_follow_ups;

        let mut conn = self.conn()?;
        let rows = customer_follow_ups::table
            .filter(customer_follow_ups::customer_id.eq(customer_id.get()))
            .order((
                customer_follow_ups::date.desc(),
                customer_follow_ups::id.desc(),
            ))
            .load::<DbFollowUp>(&mut conn)?;

        into_domain(rows)
    }
}

impl FollowUpWriter for DieselRepository {
    fn create_follow_up(
        &self,
        follow_up: &NewCustomerFollowUp,
    ) -> RepositoryResult<CustomerFollowUp> {
        use crate::schema::customer_follow_ups;

        let mut conn = self.conn()?;
        let insertable: DbNewFollowUp = follow_up.into();

        let row = diesel::insert_into(customer_follow_ups::table)
            .values(&insertable)
            .get_result::<DbFollowUp>(&mut conn)?;

        CustomerFollowUp::try_from(row).map_err(RepositoryError::from)
    }

    fn update_follow_up(
        &self,
        follow_up_id: FollowUpId,
        updates: &NewCustomerFollowUp,
    ) -> RepositoryResult<CustomerFollowUp> {
        use crate::schema::customer_follow_ups;

        let mut conn = self.conn()?;
        let changeset: DbNewFollowUp = updates.into();

        let row = diesel::update(customer_follow_ups::table.find(follow_up_id.get()))
            .set(&changeset)
            .get_result::<DbFollowUp>(&mut conn)?;

        CustomerFollowUp::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_follow_up(&self, follow_up_id: FollowUpId) -> RepositoryResult<()> {
        use crate::schema::customer_follow_ups;

        let mut conn = self.conn()?;
        let affected = diesel::delete(customer_follow_ups::table.find(follow_up_id.get()))
            .execute(&mut conn)?;

        expect_deleted(affected)
    }
}
