use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{LeadDetails, NewLead, UpdateLead};
use crate::domain::types::{CustomerId, LeadStatus, Notes, ProjectName, UserId};
use crate::forms::{FormError, choice_or, optional_amount};

/// Form data for creating or editing a lead.
#[derive(Debug, Deserialize, Validate)]
pub struct LeadForm {
    /// Blank when the lead is not linked to a customer yet.
    #[serde(default)]
    pub customer_id: String,
    #[validate(length(min = 1))]
    pub project_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub estimated_value: String,
}

pub struct LeadPayload {
    pub details: LeadDetails,
}

impl TryFrom<LeadForm> for LeadPayload {
    type Error = FormError;

    fn try_from(form: LeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let customer_id = match form.customer_id.trim() {
            "" => None,
            raw => Some(
                raw.parse::<i32>()
                    .ok()
                    .and_then(|id| CustomerId::new(id).ok())
                    .ok_or(FormError::InvalidId("customer"))?,
            ),
        };

        Ok(Self {
            details: LeadDetails {
                customer_id,
                project_name: ProjectName::new(form.project_name)
                    .map_err(|_| FormError::InvalidName)?,
                description: Notes::parse(form.description),
                status: choice_or(&form.status, LeadStatus::default(), "lead status")?,
                estimated_value: optional_amount(&form.estimated_value, "estimated value")?,
            },
        })
    }
}

impl LeadPayload {
    pub fn into_new(self, user_id: UserId) -> NewLead {
        NewLead::new(user_id, self.details)
    }

    pub fn into_update(self) -> UpdateLead {
        UpdateLead::new(self.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> LeadForm {
        LeadForm {
            customer_id: "".into(),
            project_name: "Kitchen remodel".into(),
            description: "".into(),
            status: "".into(),
            estimated_value: "".into(),
        }
    }

    #[test]
    fn defaults_to_new_without_customer() {
        let payload = LeadPayload::try_from(form()).unwrap();
        assert_eq!(payload.details.status, LeadStatus::New);
        assert_eq!(payload.details.customer_id, None);
        assert_eq!(payload.details.estimated_value, None);
    }

    #[test]
    fn parses_customer_and_value() {
        let mut form = form();
        form.customer_id = "7".into();
        form.estimated_value = "15000".into();
        form.status = "qualified".into();

        let details = LeadPayload::try_from(form).unwrap().details;
        assert_eq!(details.customer_id.map(CustomerId::get), Some(7));
        assert_eq!(details.estimated_value.unwrap().to_string(), "15000.00");
        assert_eq!(details.status, LeadStatus::Qualified);
    }

    #[test]
    fn rejects_negative_value() {
        let mut form = form();
        form.estimated_value = "-10".into();
        assert!(matches!(
            LeadPayload::try_from(form),
            Err(FormError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_missing_project_name() {
        let mut form = form();
        form.project_name = "".into();
        assert!(LeadPayload::try_from(form).is_err());
    }
}
