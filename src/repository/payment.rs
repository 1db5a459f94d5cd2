use diesel::prelude::*;

use crate::domain::money::{sum, to_decimal, to_f64};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::types::{InvoiceId, PaymentId, UserId};
use crate::models::payment::{NewPayment as DbNewPayment, Payment as DbPayment};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PaymentReader, PaymentWriter, convert_all};
use crate::schema::{invoices, payments};

/// Sets `invoices.paid_amount` to the sum of the invoice's payments.
fn sync_paid_amount(conn: &mut SqliteConnection, invoice_id: i32) -> QueryResult<()> {
    let amounts: Vec<f64> = payments::table
        .filter(payments::invoice_id.eq(invoice_id))
        .select(payments::amount)
        .load(conn)?;

    let paid = to_f64(sum(amounts.into_iter().map(to_decimal)));

    diesel::update(invoices::table.find(invoice_id))
        .set((
            invoices::paid_amount.eq(paid),
            invoices::updated_at.eq(diesel::dsl::now),
        ))
        .execute(conn)?;

    Ok(())
}

impl PaymentReader for DieselRepository {
    fn list_payments_by_invoice(
        &self,
        invoice_id: InvoiceId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Payment>> {
        let mut conn = self.conn()?;
        let rows = payments::table
            .filter(payments::invoice_id.eq(invoice_id.get()))
            .filter(payments::user_id.eq(user_id.get()))
            .order(payments::payment_date.desc())
            .then_order_by(payments::id.desc())
            .load::<DbPayment>(&mut conn)?;

        convert_all(rows)
    }
}

impl PaymentWriter for DieselRepository {
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment> {
        let mut conn = self.conn()?;
        let db_new: DbNewPayment = new_payment.into();

        let db_payment = conn.transaction::<DbPayment, diesel::result::Error, _>(|conn| {
            // The invoice must belong to the same owner as the payment.
            invoices::table
                .filter(invoices::id.eq(db_new.invoice_id))
                .filter(invoices::user_id.eq(db_new.user_id))
                .select(invoices::id)
                .first::<i32>(conn)?;

            let payment = diesel::insert_into(payments::table)
                .values(&db_new)
                .get_result::<DbPayment>(conn)?;

            sync_paid_amount(conn, payment.invoice_id)?;

            Ok(payment)
        })?;

        Payment::try_from(db_payment).map_err(RepositoryError::from)
    }

    fn delete_payment(
        &self,
        id: PaymentId,
        invoice_id: InvoiceId,
        user_id: UserId,
    ) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            let invoice_id = diesel::delete(
                payments::table
                    .filter(payments::id.eq(id.get()))
                    .filter(payments::invoice_id.eq(invoice_id.get()))
                    .filter(payments::user_id.eq(user_id.get())),
            )
            .returning(payments::invoice_id)
            .get_result::<i32>(conn)?;

            sync_paid_amount(conn, invoice_id)
        })?;

        Ok(())
    }
}
