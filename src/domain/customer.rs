use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, CustomerName, Email, Notes, PhoneNumber, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: UserId,
    pub name: CustomerName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<Notes>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Contact and address fields shared by inserts and updates.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CustomerDetails {
    pub name: CustomerName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<Notes>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewCustomer {
    pub user_id: UserId,
    pub details: CustomerDetails,
}

impl NewCustomer {
    #[must_use]
    pub fn new(user_id: UserId, details: CustomerDetails) -> Self {
        Self { user_id, details }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateCustomer {
    pub details: CustomerDetails,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(details: CustomerDetails) -> Self {
        Self { details }
    }
}
