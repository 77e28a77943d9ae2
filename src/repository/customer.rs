//! Repository implementation for customers and tags.

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::customer::{Customer, CustomerDependents, NewCustomer, NewTag, Tag};
use crate::domain::types::{CustomerId, CustomerQq, TagId, TagName};
use crate::models::customer::{
    Customer as DbCustomer, CustomerTag as DbCustomerTag, NewCustomer as DbNewCustomer,
    NewTag as DbNewTag, Tag as DbTag,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, TagReader, TagWriter,
    expect_deleted, into_domain, unique_ids,
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .find(id.get())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(|c| Customer::try_from(c).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_customer_by_qq(&self, qq: &CustomerQq) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::qq.eq(qq.as_str()))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(|c| Customer::try_from(c).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::schema::{customer_tags, customers};

        let mut conn = self.conn()?;

        let tagged = match query.tag_id {
            Some(tag_id) => Some(
                customer_tags::table
                    .filter(customer_tags::tag_id.eq(tag_id.get()))
                    .select(customer_tags::customer_id)
                    .load::<i32>(&mut conn)?,
            ),
            None => None,
        };

        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        let query_builder = || {
            let mut items = customers::table.into_boxed::<Sqlite>();

            if let Some(consultant_id) = query.consultant_id {
                items = items.filter(customers::consultant_id.eq(consultant_id.get()));
            }
            if let Some(source) = query.source {
                items = items.filter(customers::source.eq(source.value()));
            }
            if let Some(ids) = &tagged {
                items = items.filter(customers::id.eq_any(ids.clone()));
            }
            if let Some(pattern) = &pattern {
                items = items.filter(
                    customers::qq
                        .nullable()
                        .like(pattern.clone())
                        .or(customers::name.like(pattern.clone()))
                        .or(customers::qq_name.like(pattern.clone()))
                        .or(customers::phone.like(pattern.clone())),
                );
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(customers::id.asc());
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let customers = into_domain(items.load::<DbCustomer>(&mut conn)?)?;
        Ok((total, customers))
    }

    fn list_customer_tags(&self, customer_id: CustomerId) -> RepositoryResult<Vec<Tag>> {
        use crate::schema::{customer_tags, tags};

        let mut conn = self.conn()?;
        let rows = tags::table
            .inner_join(customer_tags::table)
            .filter(customer_tags::customer_id.eq(customer_id.get()))
            .select(tags::all_columns)
            .order(tags::name.asc())
            .load::<DbTag>(&mut conn)?;

        into_domain(rows)
    }

    fn count_customer_dependents(
        &self,
        customer_id: CustomerId,
    ) -> RepositoryResult<CustomerDependents> {
        use crate::schema::{customer_follow_ups, enrollments, payments, study_records};

        let mut conn = self.conn()?;
        let id = customer_id.get();

        let follow_ups = customer_follow_ups::table
            .filter(customer_follow_ups::customer_id.eq(id))
            .count()
            .get_result::<i64>(&mut conn)?;
        let enrollments_count = enrollments::table
            .filter(enrollments::customer_id.eq(id))
            .count()
            .get_result::<i64>(&mut conn)?;
        let study_records_count = study_records::table
            .inner_join(enrollments::table)
            .filter(enrollments::customer_id.eq(id))
            .count()
            .get_result::<i64>(&mut conn)?;
        let payments_count = payments::table
            .filter(payments::customer_id.eq(id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(CustomerDependents {
            follow_ups: follow_ups as usize,
            enrollments: enrollments_count as usize,
            study_records: study_records_count as usize,
            payments: payments_count as usize,
        })
    }
}

fn insert_customer(
    conn: &mut SqliteConnection,
    new_customer: &NewCustomer,
) -> QueryResult<DbCustomer> {
    use crate::schema::customers;

    diesel::insert_into(customers::table)
        .values(&DbNewCustomer::from(new_customer))
        .get_result(conn)
}

fn overwrite_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
    updates: &NewCustomer,
) -> QueryResult<DbCustomer> {
    use crate::schema::customers;

    diesel::update(customers::table.find(customer_id.get()))
        .set(&DbNewCustomer::from(updates))
        .get_result(conn)
}

/// Swaps the tag links of a customer; callers run it inside a transaction.
fn replace_tags(
    conn: &mut SqliteConnection,
    customer_id: i32,
    tag_ids: &[TagId],
) -> QueryResult<usize> {
    use crate::schema::customer_tags;

    diesel::delete(customer_tags::table.filter(customer_tags::customer_id.eq(customer_id)))
        .execute(conn)?;

    let links = unique_ids(tag_ids)
        .into_iter()
        .map(|tag_id| DbCustomerTag {
            customer_id,
            tag_id: tag_id.get(),
        })
        .collect::<Vec<_>>();

    if links.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(customer_tags::table)
        .values(links)
        .execute(conn)
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;
        let db_customer = insert_customer(&mut conn, new_customer)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn update_customer(
        &self,
        customer_id: CustomerId,
        updates: &NewCustomer,
    ) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;
        let db_customer = overwrite_customer(&mut conn, customer_id, updates)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn delete_customer(&self, customer_id: CustomerId) -> RepositoryResult<()> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(customers::table.find(customer_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }

    fn set_customer_tags(
        &self,
        customer_id: CustomerId,
        tag_ids: &[TagId],
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction(|conn| replace_tags(conn, customer_id.get(), tag_ids))
            .map_err(RepositoryError::from)
    }

    fn create_customer_with_tags(
        &self,
        new_customer: &NewCustomer,
        tag_ids: &[TagId],
    ) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;

        let db_customer = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let row = insert_customer(conn, new_customer)?;
            replace_tags(conn, row.id, tag_ids)?;
            Ok(row)
        })?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn update_customer_with_tags(
        &self,
        customer_id: CustomerId,
        updates: &NewCustomer,
        tag_ids: &[TagId],
    ) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;

        let db_customer = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let row = overwrite_customer(conn, customer_id, updates)?;
            replace_tags(conn, customer_id.get(), tag_ids)?;
            Ok(row)
        })?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }
}

impl TagReader for DieselRepository {
    fn get_tag_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let tag = tags::table
            .find(id.get())
            .first::<DbTag>(&mut conn)
            .optional()?;

        tag.map(|t| Tag::try_from(t).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_tags(&self) -> RepositoryResult<Vec<Tag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let rows = tags::table
            .order(tags::name.asc())
            .load::<DbTag>(&mut conn)?;

        into_domain(rows)
    }

    fn get_tag_by_name(&self, name: &TagName) -> RepositoryResult<Option<Tag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let tag = tags::table
            .filter(tags::name.eq(name.as_str()))
            .first::<DbTag>(&mut conn)
            .optional()?;

        tag.map(|t| Tag::try_from(t).map_err(RepositoryError::from))
            .transpose()
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let db_tag = diesel::insert_into(tags::table)
            .values(&DbNewTag {
                name: new_tag.name.as_str(),
            })
            .get_result::<DbTag>(&mut conn)?;

        Tag::try_from(db_tag).map_err(RepositoryError::from)
    }

    fn update_tag(&self, tag_id: TagId, updates: &NewTag) -> RepositoryResult<Tag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let db_tag = diesel::update(tags::table.find(tag_id.get()))
            .set(&DbNewTag {
                name: updates.name.as_str(),
            })
            .get_result::<DbTag>(&mut conn)?;

        Tag::try_from(db_tag).map_err(RepositoryError::from)
    }

    fn delete_tag(&self, tag_id: TagId) -> RepositoryResult<()> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let affected = diesel::delete(tags::table.find(tag_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }
}
