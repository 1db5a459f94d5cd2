//! DTOs exposed by the JSON API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;

/// Query parameters accepted by `/api/v1/customers`.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    /// Optional free-form search string applied to the customer list.
    pub query: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Result payload returned by [`crate::services::api::list_customers`].
#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    /// Total number of customers matching the filter.
    pub total: usize,
    /// Page of customers requested by the caller.
    pub customers: Vec<Customer>,
}
