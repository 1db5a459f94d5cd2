//! Site visits documenting measurements taken at a lead's property.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{LeadId, Notes, SiteVisitId, UserId};

/// Time used when the visit form leaves the time blank.
pub const DEFAULT_VISIT_TIME: (u32, u32) = (9, 0);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SiteVisit {
    pub id: SiteVisitId,
    pub user_id: UserId,
    pub lead_id: LeadId,
    pub visit_date: NaiveDateTime,
    pub notes: Option<Notes>,
    pub measurements: Option<Notes>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SiteVisit {
    /// Date part formatted for `<input type="date">`.
    pub fn date_input(&self) -> String {
        self.visit_date.format("%Y-%m-%d").to_string()
    }

    /// Time part formatted for `<input type="time">`.
    pub fn time_input(&self) -> String {
        self.visit_date.format("%H:%M").to_string()
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SiteVisitListItem {
    pub visit: SiteVisit,
    pub project_name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SiteVisitDetails {
    pub lead_id: LeadId,
    pub visit_date: NaiveDateTime,
    pub notes: Option<Notes>,
    pub measurements: Option<Notes>,
}

/// Combines a visit date with an optional time of day.
pub fn visit_datetime(date: NaiveDate, time: Option<NaiveTime>) -> NaiveDateTime {
    let (hour, minute) = DEFAULT_VISIT_TIME;
    let time = time.unwrap_or_else(|| NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default());
    date.and_time(time)
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewSiteVisit {
    pub user_id: UserId,
    pub details: SiteVisitDetails,
}

impl NewSiteVisit {
    #[must_use]
    pub fn new(user_id: UserId, details: SiteVisitDetails) -> Self {
        Self { user_id, details }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateSiteVisit {
    pub details: SiteVisitDetails,
}

impl UpdateSiteVisit {
    #[must_use]
    pub fn new(details: SiteVisitDetails) -> Self {
        Self { details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_time_defaults_to_nine() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let dt = visit_datetime(date, None);
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-03-14 09:00");
    }

    #[test]
    fn explicit_time_is_kept() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let time = NaiveTime::from_hms_opt(15, 30, 0);
        assert_eq!(visit_datetime(date, time).format("%H:%M").to_string(), "15:30");
    }
}
