use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::payment::NewPayment;
use crate::domain::types::{InvoiceId, Notes, PaymentMethod, UserId};
use crate::forms::{FormError, blank_to_none, choice_or, optional_date, required_amount};

/// Payment recorded from the invoice page; the invoice comes from the path.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentForm {
    pub amount: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_date: String,
    #[serde(default)]
    pub reference_number: String,
    #[serde(default)]
    pub notes: String,
}

impl PaymentForm {
    /// `today` fills a blank payment date.
    pub fn into_new(
        self,
        user_id: UserId,
        invoice_id: InvoiceId,
        today: NaiveDate,
    ) -> Result<NewPayment, FormError> {
        Ok(NewPayment {
            user_id,
            invoice_id,
            amount: required_amount(&self.amount, "amount")?,
            payment_method: choice_or(
                &self.payment_method,
                PaymentMethod::default(),
                "payment method",
            )?,
            payment_date: optional_date(&self.payment_date, "payment date")?.unwrap_or(today),
            reference_number: blank_to_none(&self.reference_number),
            notes: Notes::parse(self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn ids() -> (UserId, InvoiceId) {
        (UserId::new(1).unwrap(), InvoiceId::new(3).unwrap())
    }

    #[test]
    fn blank_fields_use_defaults() {
        let (user_id, invoice_id) = ids();
        let today = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        let form = PaymentForm {
            amount: "$500".into(),
            ..PaymentForm::default()
        };
        let payment = form.into_new(user_id, invoice_id, today).unwrap();
        assert_eq!(payment.amount, Decimal::from_str("500.00").unwrap());
        assert_eq!(payment.payment_method, PaymentMethod::BankTransfer);
        assert_eq!(payment.payment_date, today);
        assert_eq!(payment.reference_number, None);
    }

    #[test]
    fn explicit_method_and_date_win() {
        let (user_id, invoice_id) = ids();
        let today = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        let form = PaymentForm {
            amount: "75".into(),
            payment_method: "check".into(),
            payment_date: "2025-08-01".into(),
            reference_number: " CHK-1042 ".into(),
            ..PaymentForm::default()
        };
        let payment = form.into_new(user_id, invoice_id, today).unwrap();
        assert_eq!(payment.payment_method, PaymentMethod::Check);
        assert_eq!(payment.payment_date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        assert_eq!(payment.reference_number.as_deref(), Some("CHK-1042"));
    }

    #[test]
    fn amount_is_required() {
        let (user_id, invoice_id) = ids();
        let today = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        assert!(matches!(
            PaymentForm::default().into_new(user_id, invoice_id, today),
            Err(FormError::Required("amount"))
        ));
    }
}
