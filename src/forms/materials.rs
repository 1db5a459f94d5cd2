use serde::Deserialize;
use validator::Validate;

use crate::domain::material::NewMaterial;
use crate::domain::types::{JobId, MaterialName, Notes, UserId};
use crate::forms::{FormError, blank_to_none, optional_date, required_amount};

/// Material row added from the job page; the job comes from the path.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MaterialForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    pub cost_per_unit: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub delivery_date: String,
    #[serde(default)]
    pub notes: String,
}

impl MaterialForm {
    pub fn into_new(self, user_id: UserId, job_id: JobId) -> Result<NewMaterial, FormError> {
        self.validate()?;

        Ok(NewMaterial::new(
            user_id,
            job_id,
            MaterialName::new(self.name).map_err(|_| FormError::InvalidName)?,
            required_amount(&self.quantity, "quantity")?,
            blank_to_none(&self.unit),
            required_amount(&self.cost_per_unit, "cost per unit")?,
            blank_to_none(&self.supplier),
            optional_date(&self.delivery_date, "delivery date")?,
            Notes::parse(self.notes),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn ids() -> (UserId, JobId) {
        (UserId::new(1).unwrap(), JobId::new(9).unwrap())
    }

    #[test]
    fn computes_total_cost() {
        let (user_id, job_id) = ids();
        let form = MaterialForm {
            name: "Lumber 2x4".into(),
            quantity: "40".into(),
            unit: "pcs".into(),
            cost_per_unit: "3.85".into(),
            ..MaterialForm::default()
        };
        let material = form.into_new(user_id, job_id).unwrap();
        assert_eq!(material.job_id, job_id);
        assert_eq!(material.total_cost, Decimal::from_str("154.00").unwrap());
        assert_eq!(material.supplier, None);
    }

    #[test]
    fn quantity_and_cost_are_required() {
        let (user_id, job_id) = ids();
        let form = MaterialForm {
            name: "Nails".into(),
            quantity: "".into(),
            cost_per_unit: "1".into(),
            ..MaterialForm::default()
        };
        assert!(matches!(
            form.into_new(user_id, job_id),
            Err(FormError::Required("quantity"))
        ));
    }

    #[test]
    fn name_is_required() {
        let (user_id, job_id) = ids();
        let form = MaterialForm {
            quantity: "1".into(),
            cost_per_unit: "1".into(),
            ..MaterialForm::default()
        };
        assert!(form.into_new(user_id, job_id).is_err());
    }
}
