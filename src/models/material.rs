//! Diesel models for job materials.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::material::{Material as DomainMaterial, NewMaterial as DomainNewMaterial};
use crate::domain::money::{to_decimal, to_f64};
use crate::domain::types::{JobId, MaterialId, MaterialName, Notes, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::materials)]
pub struct Material {
    pub id: i32,
    pub user_id: i32,
    pub job_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub cost_per_unit: f64,
    pub total_cost: f64,
    pub supplier: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::materials)]
pub struct NewMaterial<'a> {
    pub user_id: i32,
    pub job_id: i32,
    pub name: &'a str,
    pub quantity: f64,
    pub unit: Option<&'a str>,
    pub cost_per_unit: f64,
    pub total_cost: f64,
    pub supplier: Option<&'a str>,
    pub delivery_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Material> for DomainMaterial {
    type Error = TypeConstraintError;

    fn try_from(material: Material) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MaterialId::try_from(material.id)?,
            user_id: UserId::try_from(material.user_id)?,
            job_id: JobId::try_from(material.job_id)?,
            name: MaterialName::new(material.name)?,
            quantity: to_decimal(material.quantity),
            unit: material.unit,
            cost_per_unit: to_decimal(material.cost_per_unit),
            total_cost: to_decimal(material.total_cost),
            supplier: material.supplier,
            delivery_date: material.delivery_date,
            notes: material.notes.and_then(Notes::parse),
            created_at: material.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewMaterial> for NewMaterial<'a> {
    fn from(material: &'a DomainNewMaterial) -> Self {
        Self {
            user_id: material.user_id.get(),
            job_id: material.job_id.get(),
            name: material.name.as_str(),
            quantity: to_f64(material.quantity),
            unit: material.unit.as_deref(),
            cost_per_unit: to_f64(material.cost_per_unit),
            total_cost: to_f64(material.total_cost),
            supplier: material.supplier.as_deref(),
            delivery_date: material.delivery_date,
            notes: material.notes.as_ref().map(|n| n.as_str()),
        }
    }
}
