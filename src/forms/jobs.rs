use serde::Deserialize;

use crate::domain::job::{JobDetails, NewJob, UpdateJob};
use crate::domain::types::{DocumentNumber, EstimateId, JobStatus, Notes, UserId};
use crate::forms::{FormError, choice_or, optional_date};

#[derive(Debug, Default, Deserialize)]
pub struct JobForm {
    pub estimate_id: i32,
    pub job_number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub actual_start_date: String,
    #[serde(default)]
    pub actual_end_date: String,
    #[serde(default)]
    pub notes: String,
}

pub struct JobPayload {
    pub details: JobDetails,
}

impl TryFrom<JobForm> for JobPayload {
    type Error = FormError;

    fn try_from(form: JobForm) -> Result<Self, Self::Error> {
        let estimate_id =
            EstimateId::new(form.estimate_id).map_err(|_| FormError::InvalidId("estimate"))?;
        let job_number = DocumentNumber::new(form.job_number)
            .map_err(|_| FormError::Required("job number"))?;

        Ok(Self {
            details: JobDetails {
                estimate_id,
                job_number,
                status: choice_or(&form.status, JobStatus::default(), "job status")?,
                start_date: optional_date(&form.start_date, "start date")?,
                end_date: optional_date(&form.end_date, "end date")?,
                actual_start_date: optional_date(&form.actual_start_date, "actual start date")?,
                actual_end_date: optional_date(&form.actual_end_date, "actual end date")?,
                notes: Notes::parse(form.notes),
            },
        })
    }
}

impl JobPayload {
    pub fn into_new(self, user_id: UserId) -> NewJob {
        NewJob::new(user_id, self.details)
    }

    pub fn into_update(self) -> UpdateJob {
        UpdateJob::new(self.details)
    }
}
