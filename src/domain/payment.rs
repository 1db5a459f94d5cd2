//! Payments applied against invoices.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money::{round_money, sum};
use crate::domain::types::{InvoiceId, Notes, PaymentId, PaymentMethod, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub invoice_id: InvoiceId,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub reference_number: Option<String>,
    pub notes: Option<Notes>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewPayment {
    pub user_id: UserId,
    pub invoice_id: InvoiceId,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub reference_number: Option<String>,
    pub notes: Option<Notes>,
}

/// Totals shown under the payments of an invoice.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct PaymentTotals {
    pub total_paid: Decimal,
    pub remaining: Decimal,
}

impl PaymentTotals {
    /// `total_paid = sum(payments)`, `remaining = invoice_total - total_paid`.
    pub fn compute(invoice_total: Decimal, payments: &[Payment]) -> Self {
        let total_paid = sum(payments.iter().map(|p| p.amount));
        Self {
            total_paid,
            remaining: round_money(invoice_total - total_paid),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use super::*;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn payment(amount: &str) -> Payment {
        let now = Utc::now().naive_utc();
        Payment {
            id: PaymentId::new(1).unwrap(),
            user_id: UserId::new(1).unwrap(),
            invoice_id: InvoiceId::new(1).unwrap(),
            amount: d(amount),
            payment_method: PaymentMethod::Check,
            payment_date: now.date(),
            reference_number: None,
            notes: None,
            created_at: now,
        }
    }

    #[test]
    fn totals_from_payments() {
        let payments = vec![payment("250"), payment("125.50")];
        let totals = PaymentTotals::compute(d("1000"), &payments);
        assert_eq!(totals.total_paid, d("375.50"));
        assert_eq!(totals.remaining, d("624.50"));
    }

    #[test]
    fn no_payments_leaves_full_balance() {
        let totals = PaymentTotals::compute(d("80"), &[]);
        assert_eq!(totals.total_paid, Decimal::ZERO);
        assert_eq!(totals.remaining, d("80.00"));
    }

    #[test]
    fn overpayment_goes_negative() {
        let totals = PaymentTotals::compute(d("100"), &[payment("120")]);
        assert_eq!(totals.remaining, d("-20.00"));
    }
}
