use crate::domain::report::{
    ACTIVITY_PER_KIND, DashboardStats, recent_activity, revenue_by_month, status_breakdown,
};
use crate::dto::dashboard::DashboardPageData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ProfileWriter, StatsReader};
use crate::services::{ServiceResult, current_profile};

/// Gathers the dashboard figures for the caller.
pub fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardPageData>
where
    R: StatsReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let limit = ACTIVITY_PER_KIND as i64;

    let total_customers = repo.count_customers(owner.id)?;
    let lead_counts = repo.lead_status_counts(owner.id)?;
    let job_counts = repo.job_status_counts(owner.id)?;
    let invoices = repo.list_invoice_figures(owner.id).map_err(|err| {
        log::error!("Failed to load invoice figures: {err}");
        err
    })?;

    let leads = repo.recent_leads(owner.id, limit)?;
    let estimates = repo.recent_estimates(owner.id, limit)?;
    let jobs = repo.recent_jobs(owner.id, limit)?;

    Ok(DashboardPageData {
        stats: DashboardStats::compute(total_customers, &lead_counts, &job_counts, &invoices),
        revenue_by_month: revenue_by_month(&invoices),
        job_statuses: status_breakdown(&job_counts, true),
        recent_activity: recent_activity(&leads, &estimates, &jobs),
    })
}
