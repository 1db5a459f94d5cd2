use rust_decimal::Decimal;

use crate::domain::estimate::EstimateListItem;
use crate::domain::invoice::Invoice;
use crate::domain::job::{Job, JobListItem};
use crate::domain::material::Material;
use crate::domain::types::JobStatus;
use crate::pagination::Paginated;

pub struct JobsPageData {
    pub jobs: Paginated<JobListItem>,
    pub status_filter: Option<JobStatus>,
    /// Estimates offered in the add form.
    pub estimates: Vec<EstimateListItem>,
    pub suggested_number: String,
}

/// Job edit page with its materials and invoices.
pub struct JobPageData {
    pub job: Job,
    pub estimates: Vec<EstimateListItem>,
    pub materials: Vec<Material>,
    pub materials_total: Decimal,
    pub invoices: Vec<Invoice>,
}
