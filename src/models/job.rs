//! Diesel models for jobs.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::job::{Job as DomainJob, NewJob as DomainNewJob, UpdateJob as DomainUpdateJob};
use crate::domain::types::{
    DocumentNumber, EstimateId, JobId, JobStatus, Notes, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct Job {
    pub id: i32,
    pub user_id: i32,
    pub estimate_id: i32,
    pub job_number: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub actual_start_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob<'a> {
    pub user_id: i32,
    pub estimate_id: i32,
    pub job_number: &'a str,
    pub status: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub actual_start_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::jobs)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateJob<'a> {
    pub estimate_id: i32,
    pub job_number: &'a str,
    pub status: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub actual_start_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Job> for DomainJob {
    type Error = TypeConstraintError;

    fn try_from(job: Job) -> Result<Self, Self::Error> {
        Ok(Self {
            id: JobId::try_from(job.id)?,
            user_id: UserId::try_from(job.user_id)?,
            estimate_id: EstimateId::try_from(job.estimate_id)?,
            job_number: DocumentNumber::new(job.job_number)?,
            status: JobStatus::try_from(job.status)?,
            start_date: job.start_date,
            end_date: job.end_date,
            actual_start_date: job.actual_start_date,
            actual_end_date: job.actual_end_date,
            notes: job.notes.and_then(Notes::parse),
            created_at: job.created_at,
            updated_at: job.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewJob> for NewJob<'a> {
    fn from(job: &'a DomainNewJob) -> Self {
        let details = &job.details;
        Self {
            user_id: job.user_id.get(),
            estimate_id: details.estimate_id.get(),
            job_number: details.job_number.as_str(),
            status: details.status.as_str(),
            start_date: details.start_date,
            end_date: details.end_date,
            actual_start_date: details.actual_start_date,
            actual_end_date: details.actual_end_date,
            notes: details.notes.as_ref().map(|n| n.as_str()),
        }
    }
}

impl<'a> From<&'a DomainUpdateJob> for UpdateJob<'a> {
    fn from(job: &'a DomainUpdateJob) -> Self {
        let details = &job.details;
        Self {
            estimate_id: details.estimate_id.get(),
            job_number: details.job_number.as_str(),
            status: details.status.as_str(),
            start_date: details.start_date,
            end_date: details.end_date,
            actual_start_date: details.actual_start_date,
            actual_end_date: details.actual_end_date,
            notes: details.notes.as_ref().map(|n| n.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn job_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Job {
            id: 4,
            user_id: 1,
            estimate_id: 2,
            job_number: " JOB-004 ".into(),
            status: "on_hold".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            end_date: None,
            actual_start_date: None,
            actual_end_date: None,
            notes: Some("Waiting on permit".into()),
            created_at: now,
            updated_at: now,
        };
        let job = DomainJob::try_from(db).expect("valid job");
        assert_eq!(job.job_number.as_str(), "JOB-004");
        assert_eq!(job.status, JobStatus::OnHold);
        assert_eq!(job.notes.unwrap().as_str(), "Waiting on permit");
    }
}
