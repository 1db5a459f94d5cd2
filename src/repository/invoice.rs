use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::invoice::{Invoice, InvoiceListItem, NewInvoice, UpdateInvoice};
use crate::domain::types::{InvoiceId, JobId, UserId};
use crate::models::invoice::{
    Invoice as DbInvoice, NewInvoice as DbNewInvoice, UpdateInvoice as DbUpdateInvoice,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, InvoiceListQuery, InvoiceReader, InvoiceWriter, convert_all,
    ensure_affected,
};
use crate::schema::{invoices, jobs};

fn filtered(query: &InvoiceListQuery) -> invoices::BoxedQuery<'_, Sqlite> {
    let mut items = invoices::table
        .filter(invoices::user_id.eq(query.user_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(invoices::status.eq(status.as_str()));
    }

    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            invoices::invoice_number
                .like(pattern.clone())
                .or(invoices::notes.like(pattern)),
        );
    }

    items
}

fn job_numbers(
    conn: &mut SqliteConnection,
    user_id: i32,
    job_ids: Vec<i32>,
) -> QueryResult<HashMap<i32, String>> {
    if job_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let numbers = jobs::table
        .filter(jobs::user_id.eq(user_id))
        .filter(jobs::id.eq_any(job_ids))
        .select((jobs::id, jobs::job_number))
        .load::<(i32, String)>(conn)?;

    Ok(numbers.into_iter().collect())
}

impl InvoiceReader for DieselRepository {
    fn get_invoice_by_id(
        &self,
        id: InvoiceId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Invoice>> {
        let mut conn = self.conn()?;
        let db_invoice = invoices::table
            .filter(invoices::id.eq(id.get()))
            .filter(invoices::user_id.eq(user_id.get()))
            .first::<DbInvoice>(&mut conn)
            .optional()?;

        db_invoice
            .map(Invoice::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_invoices(
        &self,
        query: InvoiceListQuery,
    ) -> RepositoryResult<(usize, Vec<InvoiceListItem>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query)
            .order(invoices::created_at.desc())
            .then_order_by(invoices::id.desc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let rows = items.load::<DbInvoice>(&mut conn)?;

        let job_ids = rows.iter().map(|invoice| invoice.job_id).collect();
        let numbers = job_numbers(&mut conn, query.user_id.get(), job_ids)?;

        let invoices = rows
            .into_iter()
            .map(|db_invoice| {
                let job_number = numbers.get(&db_invoice.job_id).cloned().unwrap_or_default();
                Invoice::try_from(db_invoice)
                    .map(|invoice| InvoiceListItem::new(invoice, job_number))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, invoices))
    }

    fn list_invoices_by_job(
        &self,
        job_id: JobId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Invoice>> {
        let mut conn = self.conn()?;
        let rows = invoices::table
            .filter(invoices::job_id.eq(job_id.get()))
            .filter(invoices::user_id.eq(user_id.get()))
            .order(invoices::created_at.desc())
            .load::<DbInvoice>(&mut conn)?;

        convert_all(rows)
    }

    fn count_invoices(&self, user_id: UserId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total: i64 = invoices::table
            .filter(invoices::user_id.eq(user_id.get()))
            .count()
            .get_result(&mut conn)?;

        Ok(total as usize)
    }
}

impl InvoiceWriter for DieselRepository {
    fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice> {
        let mut conn = self.conn()?;
        let db_new: DbNewInvoice = new_invoice.into();

        let db_invoice = diesel::insert_into(invoices::table)
            .values(&db_new)
            .get_result::<DbInvoice>(&mut conn)?;

        Invoice::try_from(db_invoice).map_err(RepositoryError::from)
    }

    fn update_invoice(
        &self,
        id: InvoiceId,
        user_id: UserId,
        updates: &UpdateInvoice,
    ) -> RepositoryResult<Invoice> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateInvoice = updates.into();

        let db_invoice = diesel::update(
            invoices::table
                .filter(invoices::id.eq(id.get()))
                .filter(invoices::user_id.eq(user_id.get())),
        )
        .set((&db_updates, invoices::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbInvoice>(&mut conn)?;

        Invoice::try_from(db_invoice).map_err(RepositoryError::from)
    }

    fn delete_invoice(&self, id: InvoiceId, user_id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(
            invoices::table
                .filter(invoices::id.eq(id.get()))
                .filter(invoices::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)?;

        ensure_affected(affected)
    }
}
