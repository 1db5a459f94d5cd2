//! Diesel implementation of the customer repository traits.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerId, UserId};
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, convert_all,
    ensure_affected,
};
use crate::schema::customers;

fn filtered(query: &CustomerListQuery) -> customers::BoxedQuery<'_, Sqlite> {
    let mut items = customers::table
        .filter(customers::user_id.eq(query.user_id.get()))
        .into_boxed();

    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            customers::name
                .like(pattern.clone())
                .or(customers::email.like(pattern.clone()))
                .or(customers::phone.like(pattern.clone()))
                .or(customers::city.like(pattern)),
        );
    }

    items
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(
        &self,
        id: CustomerId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;
        let db_customer = customers::table
            .filter(customers::id.eq(id.get()))
            .filter(customers::user_id.eq(user_id.get()))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        db_customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query).order(customers::name.asc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let rows = items.load::<DbCustomer>(&mut conn)?;

        Ok((total as usize, convert_all(rows)?))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;
        let db_new: DbNewCustomer = new_customer.into();

        let db_customer = diesel::insert_into(customers::table)
            .values(&db_new)
            .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let insertables: Vec<DbNewCustomer> = new_customers.iter().map(Into::into).collect();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::insert_into(customers::table)
                .values(&insertables)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }

    fn update_customer(
        &self,
        id: CustomerId,
        user_id: UserId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateCustomer = updates.into();

        let db_customer = diesel::update(
            customers::table
                .filter(customers::id.eq(id.get()))
                .filter(customers::user_id.eq(user_id.get())),
        )
        .set((&db_updates, customers::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn delete_customer(&self, id: CustomerId, user_id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(
            customers::table
                .filter(customers::id.eq(id.get()))
                .filter(customers::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)?;

        ensure_affected(affected)
    }
}
