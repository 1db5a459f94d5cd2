//! Diesel models for site visits.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::site_visit::{
    NewSiteVisit as DomainNewSiteVisit, SiteVisit as DomainSiteVisit,
    UpdateSiteVisit as DomainUpdateSiteVisit,
};
use crate::domain::types::{LeadId, Notes, SiteVisitId, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::site_visits)]
pub struct SiteVisit {
    pub id: i32,
    pub user_id: i32,
    pub lead_id: i32,
    pub visit_date: NaiveDateTime,
    pub notes: Option<String>,
    pub measurements: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::site_visits)]
pub struct NewSiteVisit<'a> {
    pub user_id: i32,
    pub lead_id: i32,
    pub visit_date: NaiveDateTime,
    pub notes: Option<&'a str>,
    pub measurements: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::site_visits)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateSiteVisit<'a> {
    pub lead_id: i32,
    pub visit_date: NaiveDateTime,
    pub notes: Option<&'a str>,
    pub measurements: Option<&'a str>,
}

impl TryFrom<SiteVisit> for DomainSiteVisit {
    type Error = TypeConstraintError;

    fn try_from(visit: SiteVisit) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SiteVisitId::try_from(visit.id)?,
            user_id: UserId::try_from(visit.user_id)?,
            lead_id: LeadId::try_from(visit.lead_id)?,
            visit_date: visit.visit_date,
            notes: visit.notes.and_then(Notes::parse),
            measurements: visit.measurements.and_then(Notes::parse),
            created_at: visit.created_at,
            updated_at: visit.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewSiteVisit> for NewSiteVisit<'a> {
    fn from(visit: &'a DomainNewSiteVisit) -> Self {
        let details = &visit.details;
        Self {
            user_id: visit.user_id.get(),
            lead_id: details.lead_id.get(),
            visit_date: details.visit_date,
            notes: details.notes.as_ref().map(|n| n.as_str()),
            measurements: details.measurements.as_ref().map(|n| n.as_str()),
        }
    }
}

impl<'a> From<&'a DomainUpdateSiteVisit> for UpdateSiteVisit<'a> {
    fn from(visit: &'a DomainUpdateSiteVisit) -> Self {
        let details = &visit.details;
        Self {
            lead_id: details.lead_id.get(),
            visit_date: details.visit_date,
            notes: details.notes.as_ref().map(|n| n.as_str()),
            measurements: details.measurements.as_ref().map(|n| n.as_str()),
        }
    }
}
