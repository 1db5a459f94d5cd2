use crate::domain::customer::Customer;
use crate::domain::lead::Lead;
use crate::pagination::Paginated;

/// Data required to render the customers list.
pub struct CustomersPageData {
    pub customers: Paginated<Customer>,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
}

/// Customer edit page with the customer's leads.
pub struct CustomerPageData {
    pub customer: Customer,
    pub leads: Vec<Lead>,
}
