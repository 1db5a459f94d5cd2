use crate::domain::report::{ReportSummary, revenue_by_month};
use crate::dto::reports::ReportsPageData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ProfileWriter, StatsReader};
use crate::services::{ServiceResult, current_profile};

/// Computes the performance and financial reports for the caller.
pub fn load_reports<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ReportsPageData>
where
    R: StatsReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let lead_counts = repo.lead_status_counts(owner.id)?;
    let estimate_counts = repo.estimate_status_counts(owner.id)?;
    let job_counts = repo.job_status_counts(owner.id)?;
    let invoices = repo.list_invoice_figures(owner.id).map_err(|err| {
        log::error!("Failed to load invoice figures: {err}");
        err
    })?;

    Ok(ReportsPageData {
        summary: ReportSummary::compute(&lead_counts, &estimate_counts, &job_counts, &invoices),
        revenue_by_month: revenue_by_month(&invoices),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::report::InvoiceFigures;
    use crate::domain::types::{EstimateStatus, InvoiceStatus, JobStatus, LeadStatus};
    use crate::services::test_support::{d, member_user, repo_for_profile};

    #[test]
    fn empty_account_reports_zeroes() {
        let mut repo = repo_for_profile(7);
        repo.expect_lead_status_counts().returning(|_| Ok(vec![]));
        repo.expect_estimate_status_counts().returning(|_| Ok(vec![]));
        repo.expect_job_status_counts().returning(|_| Ok(vec![]));
        repo.expect_list_invoice_figures().returning(|_| Ok(vec![]));

        let data = load_reports(&repo, &member_user()).unwrap();
        let summary = data.summary;
        assert_eq!(summary.conversion_rate, 0);
        assert_eq!(summary.average_job_value, d("0.00"));
        assert_eq!(summary.lead_statuses.len(), LeadStatus::ALL.len());
        assert!(data.revenue_by_month.is_empty());
    }

    #[test]
    fn rates_and_outstanding_are_computed() {
        let mut repo = repo_for_profile(7);
        repo.expect_lead_status_counts()
            .returning(|_| Ok(vec![(LeadStatus::Won, 1), (LeadStatus::Lost, 2)]));
        repo.expect_estimate_status_counts()
            .returning(|_| Ok(vec![(EstimateStatus::Accepted, 3), (EstimateStatus::Sent, 1)]));
        repo.expect_job_status_counts()
            .returning(|_| Ok(vec![(JobStatus::Completed, 2)]));
        repo.expect_list_invoice_figures().returning(|_| {
            let now = Utc::now().naive_utc();
            Ok(vec![
                InvoiceFigures {
                    status: InvoiceStatus::Paid,
                    total_amount: d("1000"),
                    paid_amount: d("1000"),
                    created_at: now,
                },
                InvoiceFigures {
                    status: InvoiceStatus::Sent,
                    total_amount: d("500"),
                    paid_amount: d("100"),
                    created_at: now,
                },
            ])
        });

        let summary = load_reports(&repo, &member_user()).unwrap().summary;
        assert_eq!(summary.conversion_rate, 33);
        assert_eq!(summary.estimate_acceptance_rate, 75);
        assert_eq!(summary.job_completion_rate, 100);
        assert_eq!(summary.average_job_value, d("500.00"));
        assert_eq!(summary.outstanding_amount, d("400.00"));
        assert_eq!(summary.paid_invoices, 1);
    }
}
