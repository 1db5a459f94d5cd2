//! Mock repository implementations for isolating services in tests.

use mockall::mock;

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
    CustomerId, EstimateId, EstimateStatus, InvoiceId, JobId, JobStatus, LeadId,
    LeadStatus, MaterialId, PaymentId, ProfileRole, SiteVisitId, UserId,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, EstimateListQuery, EstimateReader,
    EstimateWriter, InvoiceListQuery, InvoiceReader, InvoiceWriter, JobListQuery, JobReader,
    JobWriter, LeadListQuery, LeadReader, LeadWriter, MaterialReader, MaterialWriter,
    PaymentReader, PaymentWriter, ProfileReader, ProfileWriter, SiteVisitListQuery,
    SiteVisitReader, SiteVisitWriter, StatsReader,
};

mock! {
    pub Repository {}

    impl ProfileReader for Repository {
        fn get_profile_by_id(&self, id: UserId) -> RepositoryResult<Option<Profile>>;
        fn list_profiles(&self) -> RepositoryResult<Vec<Profile>>;
    }

    impl ProfileWriter for Repository {
        fn ensure_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
        fn update_profile(&self, id: UserId, updates: &UpdateProfile) -> RepositoryResult<Profile>;
        fn update_profile_role(&self, id: UserId, role: ProfileRole) -> RepositoryResult<Profile>;
    }

    impl CustomerReader for Repository {
        fn get_customer_by_id(
            &self,
            id: CustomerId,
            user_id: UserId,
        ) -> RepositoryResult<Option<Customer>>;
        fn list_customers(
            &self,
            query: CustomerListQuery,
        ) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for Repository {
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

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: LeadId, user_id: UserId) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<LeadListItem>)>;
        fn list_leads_by_customer(
            &self,
            customer_id: CustomerId,
            user_id: UserId,
        ) -> RepositoryResult<Vec<Lead>>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn update_lead(
            &self,
            id: LeadId,
            user_id: UserId,
            updates: &UpdateLead,
        ) -> RepositoryResult<Lead>;
        fn delete_lead(&self, id: LeadId, user_id: UserId) -> RepositoryResult<()>;
    }

    impl SiteVisitReader for Repository {
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

    impl SiteVisitWriter for Repository {
        fn create_site_visit(&self, new_visit: &NewSiteVisit) -> RepositoryResult<SiteVisit>;
        fn update_site_visit(
            &self,
            id: SiteVisitId,
            user_id: UserId,
            updates: &UpdateSiteVisit,
        ) -> RepositoryResult<SiteVisit>;
        fn delete_site_visit(&self, id: SiteVisitId, user_id: UserId) -> RepositoryResult<()>;
    }

    impl EstimateReader for Repository {
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

    impl EstimateWriter for Repository {
        fn create_estimate(&self, new_estimate: &NewEstimate) -> RepositoryResult<Estimate>;
        fn update_estimate(
            &self,
            id: EstimateId,
            user_id: UserId,
            updates: &UpdateEstimate,
        ) -> RepositoryResult<Estimate>;
        fn delete_estimate(&self, id: EstimateId, user_id: UserId) -> RepositoryResult<()>;
    }

    impl JobReader for Repository {
        fn get_job_by_id(&self, id: JobId, user_id: UserId) -> RepositoryResult<Option<Job>>;
        fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<JobListItem>)>;
        fn count_jobs(&self, user_id: UserId) -> RepositoryResult<usize>;
    }

    impl JobWriter for Repository {
        fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
        fn update_job(&self, id: JobId, user_id: UserId, updates: &UpdateJob) -> RepositoryResult<Job>;
        fn delete_job(&self, id: JobId, user_id: UserId) -> RepositoryResult<()>;
    }

    impl MaterialReader for Repository {
        fn list_materials_by_job(
            &self,
            job_id: JobId,
            user_id: UserId,
        ) -> RepositoryResult<Vec<Material>>;
    }

    impl MaterialWriter for Repository {
        fn create_material(&self, new_material: &NewMaterial) -> RepositoryResult<Material>;
        fn delete_material(
            &self,
            id: MaterialId,
            job_id: JobId,
            user_id: UserId,
        ) -> RepositoryResult<()>;
    }

    impl InvoiceReader for Repository {
        fn get_invoice_by_id(
            &self,
            id: InvoiceId,
            user_id: UserId,
        ) -> RepositoryResult<Option<Invoice>>;
        fn list_invoices(
            &self,
            query: InvoiceListQuery,
        ) -> RepositoryResult<(usize, Vec<InvoiceListItem>)>;
        fn list_invoices_by_job(
            &self,
            job_id: JobId,
            user_id: UserId,
        ) -> RepositoryResult<Vec<Invoice>>;
        fn count_invoices(&self, user_id: UserId) -> RepositoryResult<usize>;
    }

    impl InvoiceWriter for Repository {
        fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice>;
        fn update_invoice(
            &self,
            id: InvoiceId,
            user_id: UserId,
            updates: &UpdateInvoice,
        ) -> RepositoryResult<Invoice>;
        fn delete_invoice(&self, id: InvoiceId, user_id: UserId) -> RepositoryResult<()>;
    }

    impl PaymentReader for Repository {
        fn list_payments_by_invoice(
            &self,
            invoice_id: InvoiceId,
            user_id: UserId,
        ) -> RepositoryResult<Vec<Payment>>;
    }

    impl PaymentWriter for Repository {
        fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
        fn delete_payment(
            &self,
            id: PaymentId,
            invoice_id: InvoiceId,
            user_id: UserId,
        ) -> RepositoryResult<()>;
    }

    impl StatsReader for Repository {
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
}
