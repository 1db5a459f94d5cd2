//! Estimates and their priced line items.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money::{line_total, round_money, sum};
use crate::domain::types::{
    DocumentNumber, EstimateId, EstimateItemId, EstimateStatus, ItemDescription, LeadId, Notes,
    UserId,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Estimate {
    pub id: EstimateId,
    pub user_id: UserId,
    pub lead_id: LeadId,
    pub estimate_number: DocumentNumber,
    pub status: EstimateStatus,
    pub total_amount: Decimal,
    pub labor_cost: Option<Decimal>,
    pub material_cost: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub notes: Option<Notes>,
    pub valid_until: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EstimateItem {
    pub id: EstimateItemId,
    pub estimate_id: EstimateId,
    pub description: ItemDescription,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Estimate row with the lead and customer it was written for.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EstimateListItem {
    pub estimate: Estimate,
    pub project_name: String,
    pub customer_name: Option<String>,
}

/// Line item before it is attached to a stored estimate.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewEstimateItem {
    pub description: ItemDescription,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub category: Option<String>,
}

impl NewEstimateItem {
    /// Builds an item computing `total_price = quantity * unit_price`.
    #[must_use]
    pub fn new(
        description: ItemDescription,
        quantity: Decimal,
        unit_price: Decimal,
        category: Option<String>,
    ) -> Self {
        Self {
            description,
            quantity: round_money(quantity),
            unit_price: round_money(unit_price),
            total_price: line_total(quantity, unit_price),
            category: category
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Grand total of an estimate: items plus labor, material and tax.
pub fn estimate_total(
    items: &[NewEstimateItem],
    labor_cost: Option<Decimal>,
    material_cost: Option<Decimal>,
    tax_amount: Option<Decimal>,
) -> Decimal {
    let items_total = sum(items.iter().map(|item| item.total_price));
    sum([
        items_total,
        labor_cost.unwrap_or_default(),
        material_cost.unwrap_or_default(),
        tax_amount.unwrap_or_default(),
    ])
}

/// Editable estimate fields together with the full set of line items.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EstimateDetails {
    pub lead_id: LeadId,
    pub estimate_number: DocumentNumber,
    pub status: EstimateStatus,
    pub total_amount: Decimal,
    pub labor_cost: Option<Decimal>,
    pub material_cost: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub notes: Option<Notes>,
    pub valid_until: Option<NaiveDate>,
    pub items: Vec<NewEstimateItem>,
}

impl EstimateDetails {
    /// Builds the details and derives `total_amount` from the costs.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        lead_id: LeadId,
        estimate_number: DocumentNumber,
        status: EstimateStatus,
        labor_cost: Option<Decimal>,
        material_cost: Option<Decimal>,
        tax_amount: Option<Decimal>,
        notes: Option<Notes>,
        valid_until: Option<NaiveDate>,
        items: Vec<NewEstimateItem>,
    ) -> Self {
        let total_amount = estimate_total(&items, labor_cost, material_cost, tax_amount);
        Self {
            lead_id,
            estimate_number,
            status,
            total_amount,
            labor_cost,
            material_cost,
            tax_amount,
            notes,
            valid_until,
            items,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewEstimate {
    pub user_id: UserId,
    pub details: EstimateDetails,
}

impl NewEstimate {
    #[must_use]
    pub fn new(user_id: UserId, details: EstimateDetails) -> Self {
        Self { user_id, details }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateEstimate {
    pub details: EstimateDetails,
}

impl UpdateEstimate {
    #[must_use]
    pub fn new(details: EstimateDetails) -> Self {
        Self { details }
    }
}
