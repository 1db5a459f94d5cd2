use serde::Deserialize;

use crate::domain::site_visit::{NewSiteVisit, SiteVisitDetails, UpdateSiteVisit, visit_datetime};
use crate::domain::types::{LeadId, Notes, UserId};
use crate::forms::{FormError, optional_time, required_date};

/// Form data for scheduling or editing a site visit.
#[derive(Debug, Deserialize)]
pub struct SiteVisitForm {
    pub lead_id: i32,
    pub visit_date: String,
    #[serde(default)]
    pub visit_time: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub measurements: String,
}

pub struct SiteVisitPayload {
    pub details: SiteVisitDetails,
}

impl TryFrom<SiteVisitForm> for SiteVisitPayload {
    type Error = FormError;

    fn try_from(form: SiteVisitForm) -> Result<Self, Self::Error> {
        let lead_id = LeadId::new(form.lead_id).map_err(|_| FormError::InvalidId("lead"))?;
        let date = required_date(&form.visit_date, "visit date")?;
        let time = optional_time(&form.visit_time)?;

        Ok(Self {
            details: SiteVisitDetails {
                lead_id,
                visit_date: visit_datetime(date, time),
                notes: Notes::parse(form.notes),
                measurements: Notes::parse(form.measurements),
            },
        })
    }
}

impl SiteVisitPayload {
    pub fn into_new(self, user_id: UserId) -> NewSiteVisit {
        NewSiteVisit::new(user_id, self.details)
    }

    pub fn into_update(self) -> UpdateSiteVisit {
        UpdateSiteVisit::new(self.details)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn form(time: &str) -> SiteVisitForm {
        SiteVisitForm {
            lead_id: 4,
            visit_date: "2025-05-02".into(),
            visit_time: time.into(),
            notes: "Check subfloor".into(),
            measurements: "".into(),
        }
    }

    #[test]
    fn time_defaults_to_nine() {
        let details = SiteVisitPayload::try_from(form("")).unwrap().details;
        assert_eq!(
            details.visit_date,
            NaiveDate::from_ymd_opt(2025, 5, 2)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        );
        assert_eq!(details.measurements, None);
    }

    #[test]
    fn explicit_time_is_kept() {
        let details = SiteVisitPayload::try_from(form("15:45")).unwrap().details;
        assert_eq!(details.visit_date.time(), NaiveTime::from_hms_opt(15, 45, 0).unwrap());
    }

    #[test]
    fn lead_and_date_are_required() {
        let mut missing_lead = form("");
        missing_lead.lead_id = 0;
        assert!(matches!(
            SiteVisitPayload::try_from(missing_lead),
            Err(FormError::InvalidId("lead"))
        ));

        let mut missing_date = form("");
        missing_date.visit_date = "".into();
        assert!(matches!(
            SiteVisitPayload::try_from(missing_date),
            Err(FormError::Required("visit date"))
        ));
    }
}
