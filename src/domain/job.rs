use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{DocumentNumber, EstimateId, JobId, JobStatus, Notes, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub user_id: UserId,
    pub estimate_id: EstimateId,
    pub job_number: DocumentNumber,
    pub status: JobStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub actual_start_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub notes: Option<Notes>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Job row with the estimate number and project it came from.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JobListItem {
    pub job: Job,
    pub estimate_number: String,
    pub project_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct JobDetails {
    pub estimate_id: EstimateId,
    pub job_number: DocumentNumber,
    pub status: JobStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub actual_start_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub notes: Option<Notes>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewJob {
    pub user_id: UserId,
    pub details: JobDetails,
}

impl NewJob {
    #[must_use]
    pub fn new(user_id: UserId, details: JobDetails) -> Self {
        Self { user_id, details }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateJob {
    pub details: JobDetails,
}

impl UpdateJob {
    #[must_use]
    pub fn new(details: JobDetails) -> Self {
        Self { details }
    }
}
