use serde::Deserialize;

use crate::domain::invoice::{InvoiceDetails, NewInvoice, UpdateInvoice};
use crate::domain::types::{DocumentNumber, InvoiceStatus, JobId, Notes, UserId};
use crate::forms::{
    FormError, choice_or, optional_amount, optional_date, required_amount, required_date,
};

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceForm {
    pub job_id: i32,
    pub invoice_number: String,
    #[serde(default)]
    pub status: String,
    pub total_amount: String,
    #[serde(default)]
    pub tax_amount: String,
    pub due_date: String,
    #[serde(default)]
    pub paid_date: String,
    #[serde(default)]
    pub notes: String,
}

pub struct InvoicePayload {
    pub details: InvoiceDetails,
}

impl TryFrom<InvoiceForm> for InvoicePayload {
    type Error = FormError;

    fn try_from(form: InvoiceForm) -> Result<Self, Self::Error> {
        let job_id = JobId::new(form.job_id).map_err(|_| FormError::InvalidId("job"))?;
        let invoice_number = DocumentNumber::new(form.invoice_number)
            .map_err(|_| FormError::Required("invoice number"))?;

        Ok(Self {
            details: InvoiceDetails {
                job_id,
                invoice_number,
                status: choice_or(&form.status, InvoiceStatus::default(), "invoice status")?,
                total_amount: required_amount(&form.total_amount, "total amount")?,
                tax_amount: optional_amount(&form.tax_amount, "tax amount")?,
                due_date: required_date(&form.due_date, "due date")?,
                paid_date: optional_date(&form.paid_date, "paid date")?,
                notes: Notes::parse(form.notes),
            },
        })
    }
}

impl InvoicePayload {
    pub fn into_new(self, user_id: UserId) -> NewInvoice {
        NewInvoice::new(user_id, self.details)
    }

    pub fn into_update(self) -> UpdateInvoice {
        UpdateInvoice::new(self.details)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn form() -> InvoiceForm {
        InvoiceForm {
            job_id: 5,
            invoice_number: "INV-010".into(),
            total_amount: "2,400".into(),
            due_date: "2025-07-15".into(),
            ..InvoiceForm::default()
        }
    }

    #[test]
    fn status_defaults_to_draft() {
        let details = InvoicePayload::try_from(form()).unwrap().details;
        assert_eq!(details.total_amount, Decimal::from_str("2400.00").unwrap());
        assert_eq!(details.status, InvoiceStatus::Draft);
    }

    #[test]
    fn total_and_due_date_are_required() {
        let mut no_total = form();
        no_total.total_amount = "".into();
        assert!(matches!(
            InvoicePayload::try_from(no_total),
            Err(FormError::Required("total amount"))
        ));

        let mut no_due = form();
        no_due.due_date = "".into();
        assert!(matches!(
            InvoicePayload::try_from(no_due),
            Err(FormError::Required("due date"))
        ));
    }
}
