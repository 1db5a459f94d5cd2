//! DTO modules that bridge services with templates and APIs.

use serde::Deserialize;

pub mod admin;
pub mod api;
pub mod customers;
pub mod dashboard;
pub mod estimates;
pub mod invoices;
pub mod jobs;
pub mod leads;
pub mod reports;
pub mod site_visits;

/// Query parameters accepted by the list pages.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Free-text search, used by the customers list.
    pub search: Option<String>,
    /// Status filter as its snake_case value.
    pub status: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}
