//! Diesel models for estimates and their line items.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::estimate::{
    Estimate as DomainEstimate, EstimateItem as DomainEstimateItem,
    NewEstimate as DomainNewEstimate, NewEstimateItem as DomainNewEstimateItem,
    UpdateEstimate as DomainUpdateEstimate,
};
use crate::domain::money::{to_decimal, to_f64};
use crate::domain::types::{
    DocumentNumber, EstimateId, EstimateItemId, EstimateStatus, ItemDescription, LeadId, Notes,
    TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::estimates)]
pub struct Estimate {
    pub id: i32,
    pub user_id: i32,
    pub lead_id: i32,
    pub estimate_number: String,
    pub status: String,
    pub total_amount: f64,
    pub labor_cost: Option<f64>,
    pub material_cost: Option<f64>,
    pub tax_amount: Option<f64>,
    pub notes: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::estimates)]
pub struct NewEstimate<'a> {
    pub user_id: i32,
    pub lead_id: i32,
    pub estimate_number: &'a str,
    pub status: &'a str,
    pub total_amount: f64,
    pub labor_cost: Option<f64>,
    pub material_cost: Option<f64>,
    pub tax_amount: Option<f64>,
    pub notes: Option<&'a str>,
    pub valid_until: Option<NaiveDate>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::estimates)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateEstimate<'a> {
    pub lead_id: i32,
    pub estimate_number: &'a str,
    pub status: &'a str,
    pub total_amount: f64,
    pub labor_cost: Option<f64>,
    pub material_cost: Option<f64>,
    pub tax_amount: Option<f64>,
    pub notes: Option<&'a str>,
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Estimate, foreign_key = estimate_id))]
#[diesel(table_name = crate::schema::estimate_items)]
pub struct EstimateItem {
    pub id: i32,
    pub estimate_id: i32,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::estimate_items)]
pub struct NewEstimateItem<'a> {
    pub estimate_id: i32,
    pub description: &'a str,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub category: Option<&'a str>,
}

impl<'a> NewEstimateItem<'a> {
    /// Attaches a domain line item to the stored estimate `estimate_id`.
    pub fn for_estimate(estimate_id: i32, item: &'a DomainNewEstimateItem) -> Self {
        Self {
            estimate_id,
            description: item.description.as_str(),
            quantity: to_f64(item.quantity),
            unit_price: to_f64(item.unit_price),
            total_price: to_f64(item.total_price),
            category: item.category.as_deref(),
        }
    }
}

impl TryFrom<Estimate> for DomainEstimate {
    type Error = TypeConstraintError;

    fn try_from(estimate: Estimate) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EstimateId::try_from(estimate.id)?,
            user_id: UserId::try_from(estimate.user_id)?,
            lead_id: LeadId::try_from(estimate.lead_id)?,
            estimate_number: DocumentNumber::new(estimate.estimate_number)?,
            status: EstimateStatus::try_from(estimate.status)?,
            total_amount: to_decimal(estimate.total_amount),
            labor_cost: estimate.labor_cost.map(to_decimal),
            material_cost: estimate.material_cost.map(to_decimal),
            tax_amount: estimate.tax_amount.map(to_decimal),
            notes: estimate.notes.and_then(Notes::parse),
            valid_until: estimate.valid_until,
            created_at: estimate.created_at,
            updated_at: estimate.updated_at,
        })
    }
}

impl TryFrom<EstimateItem> for DomainEstimateItem {
    type Error = TypeConstraintError;

    fn try_from(item: EstimateItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EstimateItemId::try_from(item.id)?,
            estimate_id: EstimateId::try_from(item.estimate_id)?,
            description: ItemDescription::new(item.description)?,
            quantity: to_decimal(item.quantity),
            unit_price: to_decimal(item.unit_price),
            total_price: to_decimal(item.total_price),
            category: item.category,
            created_at: item.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewEstimate> for NewEstimate<'a> {
    fn from(estimate: &'a DomainNewEstimate) -> Self {
        let details = &estimate.details;
        Self {
            user_id: estimate.user_id.get(),
            lead_id: details.lead_id.get(),
            estimate_number: details.estimate_number.as_str(),
            status: details.status.as_str(),
            total_amount: to_f64(details.total_amount),
            labor_cost: details.labor_cost.map(to_f64),
            material_cost: details.material_cost.map(to_f64),
            tax_amount: details.tax_amount.map(to_f64),
            notes: details.notes.as_ref().map(|n| n.as_str()),
            valid_until: details.valid_until,
        }
    }
}

impl<'a> From<&'a DomainUpdateEstimate> for UpdateEstimate<'a> {
    fn from(estimate: &'a DomainUpdateEstimate) -> Self {
        let details = &estimate.details;
        Self {
            lead_id: details.lead_id.get(),
            estimate_number: details.estimate_number.as_str(),
            status: details.status.as_str(),
            total_amount: to_f64(details.total_amount),
            labor_cost: details.labor_cost.map(to_f64),
            material_cost: details.material_cost.map(to_f64),
            tax_amount: details.tax_amount.map(to_f64),
            notes: details.notes.as_ref().map(|n| n.as_str()),
            valid_until: details.valid_until,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::estimate::EstimateDetails;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn new_estimate_carries_computed_total() {
        let item = DomainNewEstimateItem::new(
            ItemDescription::new("Cabinets").unwrap(),
            d("4"),
            d("310.25"),
            Some("Kitchen".into()),
        );
        let details = EstimateDetails::new(
            LeadId::new(2).unwrap(),
            DocumentNumber::new("EST-007").unwrap(),
            EstimateStatus::Sent,
            Some(d("500")),
            None,
            Some(d("99.10")),
            None,
            None,
            vec![item],
        );
        let domain = DomainNewEstimate::new(UserId::new(1).unwrap(), details);
        let new: NewEstimate = (&domain).into();
        assert_eq!(new.total_amount, 1840.1);
        assert_eq!(new.status, "sent");
        assert_eq!(new.material_cost, None);

        let row = NewEstimateItem::for_estimate(11, &domain.details.items[0]);
        assert_eq!(row.estimate_id, 11);
        assert_eq!(row.total_price, 1241.0);
        assert_eq!(row.category, Some("Kitchen"));
    }

    #[test]
    fn item_into_domain() {
        let db = EstimateItem {
            id: 1,
            estimate_id: 2,
            description: "Tile".into(),
            quantity: 12.5,
            unit_price: 4.2,
            total_price: 52.5,
            category: None,
            created_at: Utc::now().naive_utc(),
        };
        let item = DomainEstimateItem::try_from(db).expect("valid item");
        assert_eq!(item.total_price, d("52.50"));
        assert_eq!(item.unit_price.to_string(), "4.20");
    }

    #[test]
    fn estimate_with_unknown_status_is_rejected() {
        let now = Utc::now().naive_utc();
        let db = Estimate {
            id: 1,
            user_id: 1,
            lead_id: 1,
            estimate_number: "EST-001".into(),
            status: "pending".into(),
            total_amount: 0.0,
            labor_cost: None,
            material_cost: None,
            tax_amount: None,
            notes: None,
            valid_until: None,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainEstimate::try_from(db).is_err());
    }
}
