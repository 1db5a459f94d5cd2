use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::domain::estimate::Estimate;
use crate::domain::job::Job;
use crate::domain::lead::Lead;
use crate::domain::report::InvoiceFigures;
use crate::domain::types::{EstimateStatus, JobStatus, LeadStatus, TypeConstraintError, UserId};
use crate::models::estimate::Estimate as DbEstimate;
use crate::models::invoice::InvoiceAmounts;
use crate::models::job::Job as DbJob;
use crate::models::lead::Lead as DbLead;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, StatsReader, convert_all};
use crate::schema::{customers, estimates, invoices, jobs, leads};

fn parse_counts<S>(rows: Vec<(String, i64)>) -> RepositoryResult<Vec<(S, i64)>>
where
    S: TryFrom<String, Error = TypeConstraintError>,
{
    rows.into_iter()
        .map(|(status, count)| {
            S::try_from(status)
                .map(|status| (status, count))
                .map_err(RepositoryError::from)
        })
        .collect()
}

impl StatsReader for DieselRepository {
    fn count_customers(&self, user_id: UserId) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;
        let total = customers::table
            .filter(customers::user_id.eq(user_id.get()))
            .count()
            .get_result(&mut conn)?;

        Ok(total)
    }

    fn lead_status_counts(&self, user_id: UserId) -> RepositoryResult<Vec<(LeadStatus, i64)>> {
        let mut conn = self.conn()?;
        let rows = leads::table
            .filter(leads::user_id.eq(user_id.get()))
            .group_by(leads::status)
            .select((leads::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        parse_counts(rows)
    }

    fn estimate_status_counts(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<(EstimateStatus, i64)>> {
        let mut conn = self.conn()?;
        let rows = estimates::table
            .filter(estimates::user_id.eq(user_id.get()))
            .group_by(estimates::status)
            .select((estimates::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        parse_counts(rows)
    }

    fn job_status_counts(&self, user_id: UserId) -> RepositoryResult<Vec<(JobStatus, i64)>> {
        let mut conn = self.conn()?;
        let rows = jobs::table
            .filter(jobs::user_id.eq(user_id.get()))
            .group_by(jobs::status)
            .select((jobs::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        parse_counts(rows)
    }

    fn list_invoice_figures(&self, user_id: UserId) -> RepositoryResult<Vec<InvoiceFigures>> {
        let mut conn = self.conn()?;
        let rows = invoices::table
            .filter(invoices::user_id.eq(user_id.get()))
            .order(invoices::created_at.asc())
            .select((
                invoices::status,
                invoices::total_amount,
                invoices::paid_amount,
                invoices::created_at,
            ))
            .load::<InvoiceAmounts>(&mut conn)?;

        convert_all(rows)
    }

    fn recent_leads(&self, user_id: UserId, limit: i64) -> RepositoryResult<Vec<Lead>> {
        let mut conn = self.conn()?;
        let rows = leads::table
            .filter(leads::user_id.eq(user_id.get()))
            .order(leads::created_at.desc())
            .then_order_by(leads::id.desc())
            .limit(limit)
            .load::<DbLead>(&mut conn)?;

        convert_all(rows)
    }

    fn recent_estimates(&self, user_id: UserId, limit: i64) -> RepositoryResult<Vec<Estimate>> {
        let mut conn = self.conn()?;
        let rows = estimates::table
            .filter(estimates::user_id.eq(user_id.get()))
            .order(estimates::created_at.desc())
            .then_order_by(estimates::id.desc())
            .limit(limit)
            .load::<DbEstimate>(&mut conn)?;

        convert_all(rows)
    }

    fn recent_jobs(&self, user_id: UserId, limit: i64) -> RepositoryResult<Vec<Job>> {
        let mut conn = self.conn()?;
        let rows = jobs::table
            .filter(jobs::user_id.eq(user_id.get()))
            .order(jobs::created_at.desc())
            .then_order_by(jobs::id.desc())
            .limit(limit)
            .load::<DbJob>(&mut conn)?;

        convert_all(rows)
    }
}
