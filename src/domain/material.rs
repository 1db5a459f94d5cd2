//! Materials purchased for a job.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money::{line_total, round_money, sum};
use crate::domain::types::{JobId, MaterialId, MaterialName, Notes, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub name: MaterialName,
    pub quantity: Decimal,
    pub unit: Option<String>,
    pub cost_per_unit: Decimal,
    pub total_cost: Decimal,
    pub supplier: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub notes: Option<Notes>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewMaterial {
    pub user_id: UserId,
    pub job_id: JobId,
    pub name: MaterialName,
    pub quantity: Decimal,
    pub unit: Option<String>,
    pub cost_per_unit: Decimal,
    pub total_cost: Decimal,
    pub supplier: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub notes: Option<Notes>,
}

impl NewMaterial {
    /// Builds a material computing `total_cost = quantity * cost_per_unit`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        user_id: UserId,
        job_id: JobId,
        name: MaterialName,
        quantity: Decimal,
        unit: Option<String>,
        cost_per_unit: Decimal,
        supplier: Option<String>,
        delivery_date: Option<NaiveDate>,
        notes: Option<Notes>,
    ) -> Self {
        Self {
            user_id,
            job_id,
            name,
            quantity: round_money(quantity),
            unit,
            cost_per_unit: round_money(cost_per_unit),
            total_cost: line_total(quantity, cost_per_unit),
            supplier,
            delivery_date,
            notes,
        }
    }
}

/// Sum of `total_cost` over the materials of a job.
pub fn materials_total(materials: &[Material]) -> Decimal {
    sum(materials.iter().map(|m| m.total_cost))
}
