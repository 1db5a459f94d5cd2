use crate::domain::customer::Customer;
use crate::domain::estimate::Estimate;
use crate::domain::lead::{Lead, LeadListItem};
use crate::domain::site_visit::SiteVisit;
use crate::domain::types::LeadStatus;
use crate::pagination::Paginated;

pub struct LeadsPageData {
    pub leads: Paginated<LeadListItem>,
    pub status_filter: Option<LeadStatus>,
    /// Customers offered in the add form.
    pub customers: Vec<Customer>,
}

/// Lead edit page with everything recorded against the lead.
pub struct LeadPageData {
    pub lead: Lead,
    pub customers: Vec<Customer>,
    pub site_visits: Vec<SiteVisit>,
    pub estimates: Vec<Estimate>,
}
