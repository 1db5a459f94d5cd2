//! Diesel models for invoice payments.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::money::{to_decimal, to_f64};
use crate::domain::payment::{NewPayment as DomainNewPayment, Payment as DomainPayment};
use crate::domain::types::{
    InvoiceId, Notes, PaymentId, PaymentMethod, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::payments)]
pub struct Payment {
    pub id: i32,
    pub user_id: i32,
    pub invoice_id: i32,
    pub amount: f64,
    pub payment_method: String,
    pub payment_date: NaiveDate,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub user_id: i32,
    pub invoice_id: i32,
    pub amount: f64,
    pub payment_method: &'a str,
    pub payment_date: NaiveDate,
    pub reference_number: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Payment> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from(payment: Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PaymentId::try_from(payment.id)?,
            user_id: UserId::try_from(payment.user_id)?,
            invoice_id: InvoiceId::try_from(payment.invoice_id)?,
            amount: to_decimal(payment.amount),
            payment_method: PaymentMethod::try_from(payment.payment_method)?,
            payment_date: payment.payment_date,
            reference_number: payment.reference_number,
            notes: payment.notes.and_then(Notes::parse),
            created_at: payment.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewPayment> for NewPayment<'a> {
    fn from(payment: &'a DomainNewPayment) -> Self {
        Self {
            user_id: payment.user_id.get(),
            invoice_id: payment.invoice_id.get(),
            amount: to_f64(payment.amount),
            payment_method: payment.payment_method.as_str(),
            payment_date: payment.payment_date,
            reference_number: payment.reference_number.as_deref(),
            notes: payment.notes.as_ref().map(|n| n.as_str()),
        }
    }
}
