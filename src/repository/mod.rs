//! Repository traits and their Diesel implementation.
//!
//! Every method takes the owning [`UserId`] and filters by it, so a row that
//! belongs to somebody else behaves exactly like a missing row. Method names
//! are unique across traits so a single mock can implement all of them.

use crate::db::{DbConnection, DbPool};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::estimate::{
    Estimate, EstimateItem, EstimateListItem, NewEstimate, UpdateEstimate,
};
use crate::domain::invoice::{Invoice, InvoiceListItem, NewInvoice, UpdateInvoice};
use crate::domain::job::{Job, JobListItem, NewJob, UpdateJob};
use crate::domain::lead::{Lead, LeadListItem, NewLead, UpdateLead};
use crate::domain::material::{Material, NewMaterial};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::profile::{NewProfile, Profile, UpdateProfile};
use crate::domain::report::InvoiceFigures;
use crate::domain::site_visit::{NewSiteVisit, SiteVisit, SiteVisitListItem, UpdateSiteVisit};
use crate::domain::types::{
    CustomerId, EstimateId, EstimateStatus, InvoiceId, InvoiceStatus, JobId, JobStatus,
    LeadId, LeadStatus, MaterialId, PaymentId, ProfileRole, SiteVisitId, TypeConstraintError,
    UserId,
};
use crate::pagination::Pagination;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod customer;
pub mod errors;
pub mod estimate;
pub mod invoice;
pub mod job;
pub mod lead;
pub mod material;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod payment;
pub mod profile;
pub mod site_visit;
pub mod stats;

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Converts loaded rows into domain values, failing on the first invalid row.
fn convert_all<D, T>(rows: Vec<D>) -> RepositoryResult<Vec<T>>
where
    T: TryFrom<D, Error = TypeConstraintError>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(RepositoryError::from))
        .collect()
}

/// Maps a zero row count from a scoped update or delete to `NotFound`.
fn ensure_affected(affected: usize) -> RepositoryResult<()> {
    if affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

/// Filters for list pages scoped to one owner.
///
/// `S` is the status enum of the listed entity; lists without a status
/// filter use `()`.
#[derive(Debug, Clone)]
pub struct ListQuery<S = ()> {
    pub user_id: UserId,
    pub search: Option<String>,
    pub status: Option<S>,
    pub pagination: Option<Pagination>,
}

impl<S> ListQuery<S> {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            search: None,
            status: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

pub type CustomerListQuery = ListQuery<()>;
pub type LeadListQuery = ListQuery<LeadStatus>;
pub type SiteVisitListQuery = ListQuery<()>;
pub type EstimateListQuery = ListQuery<EstimateStatus>;
pub type JobListQuery = ListQuery<JobStatus>;
pub type InvoiceListQuery = ListQuery<InvoiceStatus>;

pub trait ProfileReader {
    fn get_profile_by_id(&self, id: UserId) -> RepositoryResult<Option<Profile>>;
    /// All profiles, newest first.
    fn list_profiles(&self) -> RepositoryResult<Vec<Profile>>;
}

pub trait ProfileWriter {
    /// Inserts the profile unless one with the same email exists, then
    /// returns the stored row.
    fn ensure_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
    fn update_profile(&self, id: UserId, updates: &UpdateProfile) -> RepositoryResult<Profile>;
    fn update_profile_role(&self, id: UserId, role: ProfileRole) -> RepositoryResult<Profile>;
}

pub trait CustomerReader {
    fn get_customer_by_id(
        &self,
        id: CustomerId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
    fn update_customer(
        &self,
        id: CustomerId,
        user_id: UserId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, id: CustomerId, user_id: UserId) -> RepositoryResult<()>;
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: LeadId, user_id: UserId) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<LeadListItem>)>;
    fn list_leads_by_customer(
        &self,
        customer_id: CustomerId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Lead>>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    fn update_lead(&self, id: LeadId, user_id: UserId, updates: &UpdateLead)
    -> RepositoryResult<Lead>;
    fn delete_lead(&self, id: LeadId, user_id: UserId) -> RepositoryResult<()>;
}

pub trait SiteVisitReader {
    fn get_site_visit_by_id(
        &self,
        id: SiteVisitId,
        user_id: UserId,
    ) -> RepositoryResult<Option<SiteVisit>>;
    fn list_site_visits(
        &self,
        query: SiteVisitListQuery,
    ) -> RepositoryResult<(usize, Vec<SiteVisitListItem>)>;
    fn list_site_visits_by_lead(
        &self,
        lead_id: LeadId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<SiteVisit>>;
}

pub trait SiteVisitWriter {
    fn create_site_visit(&self, new_visit: &NewSiteVisit) -> RepositoryResult<SiteVisit>;
    fn update_site_visit(
        &self,
        id: SiteVisitId,
        user_id: UserId,
        updates: &UpdateSiteVisit,
    ) -> RepositoryResult<SiteVisit>;
    fn delete_site_visit(&self, id: SiteVisitId, user_id: UserId) -> RepositoryResult<()>;
}

pub trait EstimateReader {
    fn get_estimate_by_id(
        &self,
        id: EstimateId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Estimate>>;
    fn list_estimate_items(
        &self,
        estimate_id: EstimateId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<EstimateItem>>;
    fn list_estimates(
        &self,
        query: EstimateListQuery,
    ) -> RepositoryResult<(usize, Vec<EstimateListItem>)>;
    fn list_estimates_by_lead(
        &self,
        lead_id: LeadId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Estimate>>;
    fn count_estimates(&self, user_id: UserId) -> RepositoryResult<usize>;
}

pub trait EstimateWriter {
    /// Inserts the estimate and its items in one transaction.
    fn create_estimate(&self, new_estimate: &NewEstimate) -> RepositoryResult<Estimate>;
    /// Updates the estimate and replaces its items in one transaction.
    fn update_estimate(
        &self,
        id: EstimateId,
        user_id: UserId,
        updates: &UpdateEstimate,
    ) -> RepositoryResult<Estimate>;
    fn delete_estimate(&self, id: EstimateId, user_id: UserId) -> RepositoryResult<()>;
}

pub trait JobReader {
    fn get_job_by_id(&self, id: JobId, user_id: UserId) -> RepositoryResult<Option<Job>>;
    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<JobListItem>)>;
    fn count_jobs(&self, user_id: UserId) -> RepositoryResult<usize>;
}

pub trait JobWriter {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
    fn update_job(&self, id: JobId, user_id: UserId, updates: &UpdateJob) -> RepositoryResult<Job>;
    fn delete_job(&self, id: JobId, user_id: UserId) -> RepositoryResult<()>;
}

pub trait MaterialReader {
    fn list_materials_by_job(&self, job_id: JobId, user_id: UserId)
    -> RepositoryResult<Vec<Material>>;
}

pub trait MaterialWriter {
    fn create_material(&self, new_material: &NewMaterial) -> RepositoryResult<Material>;
    /// Deletes a material only when it belongs to `job_id`.
    fn delete_material(
        &self,
        id: MaterialId,
        job_id: JobId,
        user_id: UserId,
    ) -> RepositoryResult<()>;
}

pub trait InvoiceReader {
    fn get_invoice_by_id(&self, id: InvoiceId, user_id: UserId)
    -> RepositoryResult<Option<Invoice>>;
    fn list_invoices(
        &self,
        query: InvoiceListQuery,
    ) -> RepositoryResult<(usize, Vec<InvoiceListItem>)>;
    fn list_invoices_by_job(&self, job_id: JobId, user_id: UserId)
    -> RepositoryResult<Vec<Invoice>>;
    fn count_invoices(&self, user_id: UserId) -> RepositoryResult<usize>;
}

pub trait InvoiceWriter {
    fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice>;
    fn update_invoice(
        &self,
        id: InvoiceId,
        user_id: UserId,
        updates: &UpdateInvoice,
    ) -> RepositoryResult<Invoice>;
    fn delete_invoice(&self, id: InvoiceId, user_id: UserId) -> RepositoryResult<()>;
}

pub trait PaymentReader {
    fn list_payments_by_invoice(
        &self,
        invoice_id: InvoiceId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Payment>>;
}

pub trait PaymentWriter {
    /// Records the payment and recomputes the invoice's paid amount.
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
    /// Deletes a payment of `invoice_id` and recomputes the invoice's paid amount.
    fn delete_payment(
        &self,
        id: PaymentId,
        invoice_id: InvoiceId,
        user_id: UserId,
    ) -> RepositoryResult<()>;
}

/// Aggregate reads behind the dashboard and reports pages.
pub trait StatsReader {
    fn count_customers(&self, user_id: UserId) -> RepositoryResult<i64>;
    fn lead_status_counts(&self, user_id: UserId) -> RepositoryResult<Vec<(LeadStatus, i64)>>;
    fn estimate_status_counts(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<(EstimateStatus, i64)>>;
    fn job_status_counts(&self, user_id: UserId) -> RepositoryResult<Vec<(JobStatus, i64)>>;
    fn list_invoice_figures(&self, user_id: UserId) -> RepositoryResult<Vec<InvoiceFigures>>;
    fn recent_leads(&self, user_id: UserId, limit: i64) -> RepositoryResult<Vec<Lead>>;
    fn recent_estimates(&self, user_id: UserId, limit: i64) -> RepositoryResult<Vec<Estimate>>;
    fn recent_jobs(&self, user_id: UserId, limit: i64) -> RepositoryResult<Vec<Job>>;
}
