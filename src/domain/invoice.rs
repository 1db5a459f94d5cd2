//! Invoices billed against jobs.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money::round_money;
use crate::domain::types::{DocumentNumber, InvoiceId, InvoiceStatus, JobId, Notes, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub invoice_number: DocumentNumber,
    pub status: InvoiceStatus,
    pub total_amount: Decimal,
    pub tax_amount: Option<Decimal>,
    pub paid_amount: Decimal,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<Notes>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Invoice {
    /// Amount still owed: `total_amount - paid_amount`.
    pub fn remaining(&self) -> Decimal {
        round_money(self.total_amount - self.paid_amount)
    }
}

/// Invoice row with its job number and remaining balance.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct InvoiceListItem {
    pub invoice: Invoice,
    pub job_number: String,
    pub remaining: Decimal,
}

impl InvoiceListItem {
    pub fn new(invoice: Invoice, job_number: String) -> Self {
        let remaining = invoice.remaining();
        Self {
            invoice,
            job_number,
            remaining,
        }
    }
}

/// Editable invoice fields. `paid_amount` is absent: it only follows payments.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InvoiceDetails {
    pub job_id: JobId,
    pub invoice_number: DocumentNumber,
    pub status: InvoiceStatus,
    pub total_amount: Decimal,
    pub tax_amount: Option<Decimal>,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<Notes>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewInvoice {
    pub user_id: UserId,
    pub details: InvoiceDetails,
}

impl NewInvoice {
    #[must_use]
    pub fn new(user_id: UserId, details: InvoiceDetails) -> Self {
        Self { user_id, details }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateInvoice {
    pub details: InvoiceDetails,
}

impl UpdateInvoice {
    #[must_use]
    pub fn new(details: InvoiceDetails) -> Self {
        Self { details }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use super::*;

    pub(crate) fn sample_invoice(total: &str, paid: &str, status: InvoiceStatus) -> Invoice {
        let now = Utc::now().naive_utc();
        Invoice {
            id: InvoiceId::new(1).unwrap(),
            user_id: UserId::new(1).unwrap(),
            job_id: JobId::new(1).unwrap(),
            invoice_number: DocumentNumber::new("INV-001").unwrap(),
            status,
            total_amount: Decimal::from_str(total).unwrap(),
            tax_amount: None,
            paid_amount: Decimal::from_str(paid).unwrap(),
            due_date: now.date(),
            paid_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn remaining_subtracts_paid() {
        let invoice = sample_invoice("1500", "499.99", InvoiceStatus::Sent);
        assert_eq!(invoice.remaining(), Decimal::from_str("1000.01").unwrap());
    }

    #[test]
    fn list_item_carries_remaining() {
        let invoice = sample_invoice("200", "200", InvoiceStatus::Paid);
        let item = InvoiceListItem::new(invoice, "JOB-004".into());
        assert_eq!(item.remaining, Decimal::ZERO);
        assert_eq!(item.job_number, "JOB-004");
    }
}
