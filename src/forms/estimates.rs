use serde::Deserialize;

use crate::domain::estimate::{EstimateDetails, NewEstimate, NewEstimateItem, UpdateEstimate};
use crate::domain::types::{
    DocumentNumber, EstimateStatus, ItemDescription, LeadId, Notes, UserId,
};
use crate::forms::{
    FormError, blank_to_none, choice_or, optional_amount, optional_date, required_amount,
};

/// Estimate form with its line items posted as repeated `item_*` keys.
///
/// Decoded with `serde_html_form`, which collects repeated keys into vectors.
#[derive(Debug, Default, Deserialize)]
pub struct EstimateForm {
    pub lead_id: i32,
    pub estimate_number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub labor_cost: String,
    #[serde(default)]
    pub material_cost: String,
    #[serde(default)]
    pub tax_amount: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub valid_until: String,
    #[serde(default)]
    pub item_description: Vec<String>,
    #[serde(default)]
    pub item_quantity: Vec<String>,
    #[serde(default)]
    pub item_unit_price: Vec<String>,
    #[serde(default)]
    pub item_category: Vec<String>,
}

impl EstimateForm {
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| FormError::Malformed(err.to_string()))
    }

    fn items(&self) -> Result<Vec<NewEstimateItem>, FormError> {
        let column = |values: &[String], index: usize| -> String {
            values.get(index).cloned().unwrap_or_default()
        };

        let mut items = Vec::new();
        for (index, description) in self.item_description.iter().enumerate() {
            let Ok(description) = ItemDescription::new(description.as_str()) else {
                continue;
            };
            let quantity = match column(&self.item_quantity, index) {
                raw if raw.trim().is_empty() => rust_decimal::Decimal::ONE,
                raw => required_amount(&raw, "item quantity")?,
            };
            let unit_price = required_amount(&column(&self.item_unit_price, index), "item price")?;
            items.push(NewEstimateItem::new(
                description,
                quantity,
                unit_price,
                blank_to_none(&column(&self.item_category, index)),
            ));
        }
        Ok(items)
    }
}

pub struct EstimatePayload {
    pub details: EstimateDetails,
}

impl TryFrom<EstimateForm> for EstimatePayload {
    type Error = FormError;

    fn try_from(form: EstimateForm) -> Result<Self, Self::Error> {
        let lead_id = LeadId::new(form.lead_id).map_err(|_| FormError::InvalidId("lead"))?;
        let estimate_number = DocumentNumber::new(form.estimate_number.as_str())
            .map_err(|_| FormError::Required("estimate number"))?;
        let items = form.items()?;

        Ok(Self {
            details: EstimateDetails::new(
                lead_id,
                estimate_number,
                choice_or(&form.status, EstimateStatus::default(), "estimate status")?,
                optional_amount(&form.labor_cost, "labor cost")?,
                optional_amount(&form.material_cost, "material cost")?,
                optional_amount(&form.tax_amount, "tax amount")?,
                Notes::parse(form.notes),
                optional_date(&form.valid_until, "valid until")?,
                items,
            ),
        })
    }
}

impl EstimatePayload {
    pub fn into_new(self, user_id: UserId) -> NewEstimate {
        NewEstimate::new(user_id, self.details)
    }

    pub fn into_update(self) -> UpdateEstimate {
        UpdateEstimate::new(self.details)
    }
}
