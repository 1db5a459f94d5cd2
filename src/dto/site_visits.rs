use crate::domain::lead::LeadListItem;
use crate::domain::site_visit::{SiteVisit, SiteVisitListItem};
use crate::pagination::Paginated;

pub struct SiteVisitsPageData {
    pub visits: Paginated<SiteVisitListItem>,
    /// Leads offered in the schedule form.
    pub leads: Vec<LeadListItem>,
}

pub struct SiteVisitPageData {
    pub visit: SiteVisit,
    pub leads: Vec<LeadListItem>,
}
