use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, LeadId, LeadStatus, Notes, ProjectName, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub user_id: UserId,
    pub customer_id: Option<CustomerId>,
    pub project_name: ProjectName,
    pub description: Option<Notes>,
    pub status: LeadStatus,
    pub estimated_value: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Lead row joined with the name of its customer for list views.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LeadListItem {
    pub lead: Lead,
    pub customer_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LeadDetails {
    pub customer_id: Option<CustomerId>,
    pub project_name: ProjectName,
    pub description: Option<Notes>,
    pub status: LeadStatus,
    pub estimated_value: Option<Decimal>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewLead {
    pub user_id: UserId,
    pub details: LeadDetails,
}

impl NewLead {
    #[must_use]
    pub fn new(user_id: UserId, details: LeadDetails) -> Self {
        Self { user_id, details }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateLead {
    pub details: LeadDetails,
}

impl UpdateLead {
    #[must_use]
    pub fn new(details: LeadDetails) -> Self {
        Self { details }
    }
}
