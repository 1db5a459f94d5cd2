//! Diesel models for leads.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{
    Lead as DomainLead, LeadDetails, NewLead as DomainNewLead, UpdateLead as DomainUpdateLead,
};
use crate::domain::money::{to_decimal, to_f64};
use crate::domain::types::{
    CustomerId, LeadId, LeadStatus, Notes, ProjectName, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
pub struct Lead {
    pub id: i32,
    pub user_id: i32,
    pub customer_id: Option<i32>,
    pub project_name: String,
    pub description: Option<String>,
    pub status: String,
    pub estimated_value: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
pub struct NewLead<'a> {
    pub user_id: i32,
    pub customer_id: Option<i32>,
    pub project_name: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub estimated_value: Option<f64>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateLead<'a> {
    pub customer_id: Option<i32>,
    pub project_name: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub estimated_value: Option<f64>,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::try_from(lead.id)?,
            user_id: UserId::try_from(lead.user_id)?,
            customer_id: lead.customer_id.map(CustomerId::try_from).transpose()?,
            project_name: ProjectName::new(lead.project_name)?,
            description: lead.description.and_then(Notes::parse),
            status: LeadStatus::try_from(lead.status)?,
            estimated_value: lead.estimated_value.map(to_decimal),
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        let LeadDetails {
            customer_id,
            project_name,
            description,
            status,
            estimated_value,
        } = &lead.details;
        Self {
            user_id: lead.user_id.get(),
            customer_id: customer_id.map(|id| id.get()),
            project_name: project_name.as_str(),
            description: description.as_ref().map(|d| d.as_str()),
            status: status.as_str(),
            estimated_value: estimated_value.map(to_f64),
        }
    }
}

impl<'a> From<&'a DomainUpdateLead> for UpdateLead<'a> {
    fn from(lead: &'a DomainUpdateLead) -> Self {
        let details = &lead.details;
        Self {
            customer_id: details.customer_id.map(|id| id.get()),
            project_name: details.project_name.as_str(),
            description: details.description.as_ref().map(|d| d.as_str()),
            status: details.status.as_str(),
            estimated_value: details.estimated_value.map(to_f64),
        }
    }
}
