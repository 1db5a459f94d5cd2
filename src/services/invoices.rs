use crate::domain::invoice::Invoice;
use crate::domain::payment::PaymentTotals;
use crate::domain::types::{DocumentNumber, InvoiceId, InvoiceStatus, JobId, UserId};
use crate::dto::IndexQuery;
use crate::dto::invoices::{InvoicePageData, InvoicesPageData};
use crate::forms::invoices::{InvoiceForm, InvoicePayload};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, Pagination};
use crate::repository::{
    InvoiceListQuery, InvoiceReader, InvoiceWriter, JobListQuery, JobReader, PaymentReader,
    ProfileWriter,
};
use crate::services::{ServiceError, ServiceResult, current_profile, parse_status};

/// Loads one page of invoices and the data backing the add form.
pub fn load_invoices_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
    prefix: &str,
) -> ServiceResult<InvoicesPageData>
where
    R: InvoiceReader + JobReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let pagination = Pagination::new(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE);
    let status_filter = parse_status::<InvoiceStatus>(query.status.as_deref());

    let mut list_query =
        InvoiceListQuery::new(owner.id).paginate(pagination.page, pagination.per_page);
    if let Some(status) = status_filter {
        list_query = list_query.status(status);
    }

    let (total, invoices) = repo.list_invoices(list_query).map_err(|err| {
        log::error!("Failed to list invoices: {err}");
        err
    })?;
    let (_, jobs) = repo.list_jobs(JobListQuery::new(owner.id))?;
    let existing = repo.count_invoices(owner.id)?;

    Ok(InvoicesPageData {
        invoices: Paginated::new(invoices, pagination, total),
        status_filter,
        jobs,
        suggested_number: DocumentNumber::suggest(prefix, existing),
    })
}

/// Loads an invoice with its payments and the derived totals.
pub fn load_invoice_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    invoice_id: i32,
) -> ServiceResult<InvoicePageData>
where
    R: InvoiceReader + JobReader + PaymentReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let invoice_id = InvoiceId::new(invoice_id).map_err(|_| ServiceError::NotFound)?;

    let invoice = repo
        .get_invoice_by_id(invoice_id, owner.id)?
        .ok_or(ServiceError::NotFound)?;
    let (_, jobs) = repo.list_jobs(JobListQuery::new(owner.id))?;
    let payments = repo.list_payments_by_invoice(invoice_id, owner.id)?;
    let totals = PaymentTotals::compute(invoice.total_amount, &payments);

    Ok(InvoicePageData {
        invoice,
        jobs,
        payments,
        totals,
    })
}

fn check_job<R>(repo: &R, job_id: JobId, user_id: UserId) -> ServiceResult<()>
where
    R: JobReader + ?Sized,
{
    match repo.get_job_by_id(job_id, user_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::Form("Selected job does not exist".to_string())),
    }
}

pub fn add_invoice<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: InvoiceForm,
) -> ServiceResult<Invoice>
where
    R: InvoiceWriter + JobReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let payload = InvoicePayload::try_from(form)?;
    check_job(repo, payload.details.job_id, owner.id)?;

    let invoice = repo
        .create_invoice(&payload.into_new(owner.id))
        .map_err(|err| {
            log::error!("Failed to add an invoice: {err}");
            err
        })?;

    Ok(invoice)
}

pub fn update_invoice<R>(
    repo: &R,
    user: &AuthenticatedUser,
    invoice_id: i32,
    form: InvoiceForm,
) -> ServiceResult<Invoice>
where
    R: InvoiceWriter + JobReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let invoice_id = InvoiceId::new(invoice_id).map_err(|_| ServiceError::NotFound)?;
    let payload = InvoicePayload::try_from(form)?;
    check_job(repo, payload.details.job_id, owner.id)?;

    let invoice = repo
        .update_invoice(invoice_id, owner.id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update invoice {invoice_id}: {err}");
            err
        })?;

    Ok(invoice)
}

pub fn delete_invoice<R>(repo: &R, user: &AuthenticatedUser, invoice_id: i32) -> ServiceResult<()>
where
    R: InvoiceWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let invoice_id = InvoiceId::new(invoice_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_invoice(invoice_id, owner.id).map_err(|err| {
        log::error!("Failed to delete invoice {invoice_id}: {err}");
        err
    })?;

    Ok(())
}
