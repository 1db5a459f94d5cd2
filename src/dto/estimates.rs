use crate::domain::estimate::{Estimate, EstimateItem, EstimateListItem};
use crate::domain::lead::LeadListItem;
use crate::domain::types::EstimateStatus;
use crate::pagination::Paginated;

pub struct EstimatesPageData {
    pub estimates: Paginated<EstimateListItem>,
    pub status_filter: Option<EstimateStatus>,
}

/// Blank estimate form with the next free number filled in.
pub struct NewEstimatePageData {
    pub suggested_number: String,
    pub leads: Vec<LeadListItem>,
}

pub struct EstimatePageData {
    pub estimate: Estimate,
    pub items: Vec<EstimateItem>,
    pub leads: Vec<LeadListItem>,
}
