//! Aggregations behind the dashboard and the reports page.
//!
//! The repository supplies raw counts and invoice figures; everything here is
//! pure arithmetic so it can be tested without a database.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::estimate::Estimate;
use crate::domain::job::Job;
use crate::domain::lead::Lead;
use crate::domain::money::{round_money, sum};
use crate::domain::types::{Choice, EstimateStatus, InvoiceStatus, JobStatus, LeadStatus};

/// Number of months shown in the revenue chart.
pub const REVENUE_MONTHS: usize = 6;
/// Rows taken from each entity for the activity feed.
pub const ACTIVITY_PER_KIND: usize = 3;
/// Entries shown in the activity feed.
pub const ACTIVITY_LIMIT: usize = 10;

/// Amounts of a single invoice used by revenue calculations.
#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceFigures {
    pub status: InvoiceStatus,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub created_at: NaiveDateTime,
}

/// Rounded `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: i64, whole: i64) -> u32 {
    if whole <= 0 || part <= 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn count_of<S: Choice>(counts: &[(S, i64)], wanted: &[S]) -> i64 {
    counts
        .iter()
        .filter(|(status, _)| wanted.contains(status))
        .map(|(_, count)| *count)
        .sum()
}

fn total_of<S>(counts: &[(S, i64)]) -> i64 {
    counts.iter().map(|(_, count)| *count).sum()
}

/// Row of a status breakdown table.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: &'static str,
    pub label: &'static str,
    pub count: i64,
    pub percentage: u32,
}

/// Lists every status of `S` in declaration order with its count.
///
/// Statuses missing from `counts` are reported as zero unless `skip_zero`
/// is set, in which case they are left out.
pub fn status_breakdown<S: Choice>(counts: &[(S, i64)], skip_zero: bool) -> Vec<StatusCount> {
    let total = total_of(counts);
    S::all()
        .iter()
        .map(|status| {
            let count = count_of(counts, std::slice::from_ref(status));
            StatusCount {
                status: status.value(),
                label: status.label_text(),
                count,
                percentage: percentage(count, total),
            }
        })
        .filter(|row| !(skip_zero && row.count == 0))
        .collect()
}

/// Sum of `total_amount` over paid invoices.
pub fn total_revenue(invoices: &[InvoiceFigures]) -> Decimal {
    sum(invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Paid)
        .map(|i| i.total_amount))
}

/// Sum over every invoice of `total_amount - paid_amount`.
pub fn outstanding(invoices: &[InvoiceFigures]) -> Decimal {
    sum(invoices.iter().map(|i| i.total_amount - i.paid_amount))
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_customers: i64,
    pub active_leads: i64,
    pub completed_jobs: i64,
    pub total_revenue: Decimal,
    pub pending_invoices: i64,
    pub job_completion_rate: u32,
}

impl DashboardStats {
    pub fn compute(
        total_customers: i64,
        lead_counts: &[(LeadStatus, i64)],
        job_counts: &[(JobStatus, i64)],
        invoices: &[InvoiceFigures],
    ) -> Self {
        let completed_jobs = count_of(job_counts, &[JobStatus::Completed]);
        let pending_invoices = invoices
            .iter()
            .filter(|i| InvoiceStatus::PENDING.contains(&i.status))
            .count() as i64;
        Self {
            total_customers,
            active_leads: count_of(lead_counts, LeadStatus::ACTIVE),
            completed_jobs,
            total_revenue: total_revenue(invoices),
            pending_invoices,
            job_completion_rate: percentage(completed_jobs, total_of(job_counts)),
        }
    }
}

/// Revenue of one calendar month.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MonthlyRevenue {
    /// `Mon YYYY`, e.g. `Mar 2025`.
    pub month: String,
    pub revenue: Decimal,
}

/// Paid invoice totals grouped by creation month, oldest first, limited to
/// the last `REVENUE_MONTHS` months that have revenue.
pub fn revenue_by_month(invoices: &[InvoiceFigures]) -> Vec<MonthlyRevenue> {
    let mut months: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for invoice in invoices.iter().filter(|i| i.status == InvoiceStatus::Paid) {
        let key = (invoice.created_at.year(), invoice.created_at.month());
        *months.entry(key).or_default() += invoice.total_amount;
    }
    let skip = months.len().saturating_sub(REVENUE_MONTHS);
    months
        .into_iter()
        .skip(skip)
        .filter_map(|((year, month), revenue)| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlyRevenue {
                month: first.format("%b %Y").to_string(),
                revenue: round_money(revenue),
            })
        })
        .collect()
}

/// Headline figures and breakdowns for the reports page.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ReportSummary {
    pub total_leads: i64,
    pub converted_leads: i64,
    pub conversion_rate: u32,
    pub total_estimates: i64,
    pub accepted_estimates: i64,
    pub estimate_acceptance_rate: u32,
    pub total_jobs: i64,
    pub completed_jobs: i64,
    pub job_completion_rate: u32,
    pub total_revenue: Decimal,
    pub average_job_value: Decimal,
    pub total_invoices: i64,
    pub paid_invoices: i64,
    pub outstanding_amount: Decimal,
    pub lead_statuses: Vec<StatusCount>,
    pub job_statuses: Vec<StatusCount>,
    pub invoice_statuses: Vec<StatusCount>,
}

impl ReportSummary {
    pub fn compute(
        lead_counts: &[(LeadStatus, i64)],
        estimate_counts: &[(EstimateStatus, i64)],
        job_counts: &[(JobStatus, i64)],
        invoices: &[InvoiceFigures],
    ) -> Self {
        let total_leads = total_of(lead_counts);
        let converted_leads = count_of(lead_counts, &[LeadStatus::Won]);
        let total_estimates = total_of(estimate_counts);
        let accepted_estimates = count_of(estimate_counts, &[EstimateStatus::Accepted]);
        let total_jobs = total_of(job_counts);
        let completed_jobs = count_of(job_counts, &[JobStatus::Completed]);
        let total_revenue = total_revenue(invoices);
        let average_job_value = if total_jobs > 0 {
            round_money(total_revenue / Decimal::from(total_jobs))
        } else {
            round_money(Decimal::ZERO)
        };

        let mut invoice_counts: Vec<(InvoiceStatus, i64)> = Vec::new();
        for status in InvoiceStatus::ALL {
            let count = invoices.iter().filter(|i| i.status == *status).count() as i64;
            invoice_counts.push((*status, count));
        }

        Self {
            total_leads,
            converted_leads,
            conversion_rate: percentage(converted_leads, total_leads),
            total_estimates,
            accepted_estimates,
            estimate_acceptance_rate: percentage(accepted_estimates, total_estimates),
            total_jobs,
            completed_jobs,
            job_completion_rate: percentage(completed_jobs, total_jobs),
            total_revenue,
            average_job_value,
            total_invoices: invoices.len() as i64,
            paid_invoices: count_of(&invoice_counts, &[InvoiceStatus::Paid]),
            outstanding_amount: outstanding(invoices),
            lead_statuses: status_breakdown(lead_counts, false),
            job_statuses: status_breakdown(job_counts, false),
            invoice_statuses: status_breakdown(&invoice_counts, false),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Lead,
    Estimate,
    Job,
}

/// Entry of the dashboard activity feed.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub title: &'static str,
    pub description: String,
    pub timestamp: NaiveDateTime,
    pub link: String,
}

/// Merges the newest leads, estimates and jobs, newest first.
pub fn recent_activity(leads: &[Lead], estimates: &[Estimate], jobs: &[Job]) -> Vec<Activity> {
    let mut activities: Vec<Activity> = Vec::new();
    activities.extend(leads.iter().take(ACTIVITY_PER_KIND).map(|lead| Activity {
        kind: ActivityKind::Lead,
        title: "New Lead",
        description: lead.project_name.to_string(),
        timestamp: lead.created_at,
        link: format!("/leads/{}", lead.id),
    }));
    activities.extend(estimates.iter().take(ACTIVITY_PER_KIND).map(|estimate| Activity {
        kind: ActivityKind::Estimate,
        title: "New Estimate",
        description: estimate.estimate_number.to_string(),
        timestamp: estimate.created_at,
        link: format!("/estimates/{}", estimate.id),
    }));
    activities.extend(jobs.iter().take(ACTIVITY_PER_KIND).map(|job| Activity {
        kind: ActivityKind::Job,
        title: "New Job",
        description: job.job_number.to_string(),
        timestamp: job.created_at,
        link: format!("/jobs/{}", job.id),
    }));
    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activities.truncate(ACTIVITY_LIMIT);
    activities
}
