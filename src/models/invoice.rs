//! Diesel models for invoices.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::invoice::{
    Invoice as DomainInvoice, NewInvoice as DomainNewInvoice,
    UpdateInvoice as DomainUpdateInvoice,
};
use crate::domain::money::{to_decimal, to_f64};
use crate::domain::report::InvoiceFigures;
use crate::domain::types::{
    DocumentNumber, InvoiceId, InvoiceStatus, JobId, Notes, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::invoices)]
pub struct Invoice {
    pub id: i32,
    pub user_id: i32,
    pub job_id: i32,
    pub invoice_number: String,
    pub status: String,
    pub total_amount: f64,
    pub tax_amount: Option<f64>,
    pub paid_amount: f64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::invoices)]
pub struct NewInvoice<'a> {
    pub user_id: i32,
    pub job_id: i32,
    pub invoice_number: &'a str,
    pub status: &'a str,
    pub total_amount: f64,
    pub tax_amount: Option<f64>,
    pub paid_amount: f64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::invoices)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateInvoice<'a> {
    pub job_id: i32,
    pub invoice_number: &'a str,
    pub status: &'a str,
    pub total_amount: f64,
    pub tax_amount: Option<f64>,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

/// Columns needed for revenue aggregation.
#[derive(Debug, Clone, Queryable)]
pub struct InvoiceAmounts {
    pub status: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Invoice> for DomainInvoice {
    type Error = TypeConstraintError;

    fn try_from(invoice: Invoice) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InvoiceId::try_from(invoice.id)?,
            user_id: UserId::try_from(invoice.user_id)?,
            job_id: JobId::try_from(invoice.job_id)?,
            invoice_number: DocumentNumber::new(invoice.invoice_number)?,
            status: InvoiceStatus::try_from(invoice.status)?,
            total_amount: to_decimal(invoice.total_amount),
            tax_amount: invoice.tax_amount.map(to_decimal),
            paid_amount: to_decimal(invoice.paid_amount),
            due_date: invoice.due_date,
            paid_date: invoice.paid_date,
            notes: invoice.notes.and_then(Notes::parse),
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        })
    }
}

impl TryFrom<InvoiceAmounts> for InvoiceFigures {
    type Error = TypeConstraintError;

    fn try_from(row: InvoiceAmounts) -> Result<Self, Self::Error> {
        Ok(Self {
            status: InvoiceStatus::try_from(row.status)?,
            total_amount: to_decimal(row.total_amount),
            paid_amount: to_decimal(row.paid_amount),
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewInvoice> for NewInvoice<'a> {
    fn from(invoice: &'a DomainNewInvoice) -> Self {
        let details = &invoice.details;
        Self {
            user_id: invoice.user_id.get(),
            job_id: details.job_id.get(),
            invoice_number: details.invoice_number.as_str(),
            status: details.status.as_str(),
            total_amount: to_f64(details.total_amount),
            tax_amount: details.tax_amount.map(to_f64),
            paid_amount: 0.0,
            due_date: details.due_date,
            paid_date: details.paid_date,
            notes: details.notes.as_ref().map(|n| n.as_str()),
        }
    }
}

impl<'a> From<&'a DomainUpdateInvoice> for UpdateInvoice<'a> {
    fn from(invoice: &'a DomainUpdateInvoice) -> Self {
        let details = &invoice.details;
        Self {
            job_id: details.job_id.get(),
            invoice_number: details.invoice_number.as_str(),
            status: details.status.as_str(),
            total_amount: to_f64(details.total_amount),
            tax_amount: details.tax_amount.map(to_f64),
            due_date: details.due_date,
            paid_date: details.paid_date,
            notes: details.notes.as_ref().map(|n| n.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn invoice_into_domain_keeps_remaining_exact() {
        let now = Utc::now().naive_utc();
        let db = Invoice {
            id: 1,
            user_id: 1,
            job_id: 3,
            invoice_number: "INV-001".into(),
            status: "sent".into(),
            total_amount: 1000.1,
            tax_amount: Some(80.0),
            paid_amount: 0.2,
            due_date: now.date(),
            paid_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let invoice = DomainInvoice::try_from(db).expect("valid invoice");
        assert_eq!(invoice.status, InvoiceStatus::Sent);
        assert_eq!(invoice.remaining(), Decimal::from_str("999.90").unwrap());
    }

    #[test]
    fn amounts_into_figures() {
        let row = InvoiceAmounts {
            status: "paid".into(),
            total_amount: 10.0,
            paid_amount: 10.0,
            created_at: Utc::now().naive_utc(),
        };
        let figures = InvoiceFigures::try_from(row).expect("valid figures");
        assert_eq!(figures.status, InvoiceStatus::Paid);
    }
}
