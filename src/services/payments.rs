use chrono::Local;

use crate::domain::payment::Payment;
use crate::domain::types::{InvoiceId, PaymentId};
use crate::forms::payments::PaymentForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{InvoiceReader, PaymentWriter, ProfileWriter};
use crate::services::{ServiceError, ServiceResult, current_profile};

/// Records a payment; the repository resyncs the invoice's paid amount.
pub fn add_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    invoice_id: i32,
    form: PaymentForm,
) -> ServiceResult<Payment>
where
    R: PaymentWriter + InvoiceReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let invoice_id = InvoiceId::new(invoice_id).map_err(|_| ServiceError::NotFound)?;

    if repo.get_invoice_by_id(invoice_id, owner.id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let new_payment = form.into_new(owner.id, invoice_id, Local::now().date_naive())?;
    let payment = repo.create_payment(&new_payment).map_err(|err| {
        log::error!("Failed to record payment for invoice {invoice_id}: {err}");
        err
    })?;

    log::info!(
        "Recorded payment {} of {} on invoice {invoice_id}",
        payment.id,
        payment.amount
    );
    Ok(payment)
}

/// Deletes a payment recorded against `invoice_id`.
pub fn delete_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    invoice_id: i32,
    payment_id: i32,
) -> ServiceResult<()>
where
    R: PaymentWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let invoice_id = InvoiceId::new(invoice_id).map_err(|_| ServiceError::NotFound)?;
    let payment_id = PaymentId::new(payment_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_payment(payment_id, invoice_id, owner.id).map_err(|err| {
        log::error!("Failed to delete payment {payment_id} of invoice {invoice_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PaymentMethod;
    use crate::repository::errors::RepositoryError;
    use crate::services::test_support::{d, invoice, member_user, payment, repo_for_profile};

    #[test]
    fn payment_defaults_to_bank_transfer_today() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_invoice_by_id()
            .returning(|_, _| Ok(Some(invoice(2, "1000", "0"))));
        repo.expect_create_payment()
            .withf(|new| {
                new.invoice_id.get() == 2
                    && new.amount == d("250")
                    && new.payment_method == PaymentMethod::BankTransfer
                    && new.payment_date == Local::now().date_naive()
            })
            .times(1)
            .returning(|_| Ok(payment(1, 2, "250")));

        let form = PaymentForm {
            amount: "250".into(),
            ..PaymentForm::default()
        };
        assert!(add_payment(&repo, &member_user(), 2, form).is_ok());
    }

    #[test]
    fn payment_on_foreign_invoice_is_not_found() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_invoice_by_id().returning(|_, _| Ok(None));
        repo.expect_create_payment().times(0);

        let form = PaymentForm {
            amount: "10".into(),
            ..PaymentForm::default()
        };
        let result = add_payment(&repo, &member_user(), 2, form);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn deleting_unknown_payment_is_not_found() {
        let mut repo = repo_for_profile(7);
        repo.expect_delete_payment()
            .withf(|id, invoice_id, _| id.get() == 8 && invoice_id.get() == 2)
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let result = delete_payment(&repo, &member_user(), 2, 8);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
