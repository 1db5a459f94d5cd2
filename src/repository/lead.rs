use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::lead::{Lead, LeadListItem, NewLead, UpdateLead};
use crate::domain::types::{CustomerId, LeadId, UserId};
use crate::models::lead::{Lead as DbLead, NewLead as DbNewLead, UpdateLead as DbUpdateLead};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, LeadListQuery, LeadReader, LeadWriter, convert_all, ensure_affected,
};
use crate::schema::{customers, leads};

fn filtered(query: &LeadListQuery) -> leads::BoxedQuery<'_, Sqlite> {
    let mut items = leads::table
        .filter(leads::user_id.eq(query.user_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(leads::status.eq(status.as_str()));
    }

    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            leads::project_name
                .like(pattern.clone())
                .or(leads::description.like(pattern)),
        );
    }

    items
}

/// Loads `id -> name` for the customers referenced by `leads`.
pub(super) fn customer_names(
    conn: &mut SqliteConnection,
    user_id: i32,
    customer_ids: Vec<i32>,
) -> QueryResult<HashMap<i32, String>> {
    if customer_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let names = customers::table
        .filter(customers::user_id.eq(user_id))
        .filter(customers::id.eq_any(customer_ids))
        .select((customers::id, customers::name))
        .load::<(i32, String)>(conn)?;

    Ok(names.into_iter().collect())
}

/// Loads `id -> (project name, customer id)` for the given leads.
pub(super) fn lead_projects(
    conn: &mut SqliteConnection,
    user_id: i32,
    lead_ids: Vec<i32>,
) -> QueryResult<HashMap<i32, (String, Option<i32>)>> {
    if lead_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let projects = leads::table
        .filter(leads::user_id.eq(user_id))
        .filter(leads::id.eq_any(lead_ids))
        .select((leads::id, leads::project_name, leads::customer_id))
        .load::<(i32, String, Option<i32>)>(conn)?;

    Ok(projects
        .into_iter()
        .map(|(id, name, customer_id)| (id, (name, customer_id)))
        .collect())
}

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: LeadId, user_id: UserId) -> RepositoryResult<Option<Lead>> {
        let mut conn = self.conn()?;
        let db_lead = leads::table
            .filter(leads::id.eq(id.get()))
            .filter(leads::user_id.eq(user_id.get()))
            .first::<DbLead>(&mut conn)
            .optional()?;

        db_lead
            .map(Lead::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<LeadListItem>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query)
            .order(leads::created_at.desc())
            .then_order_by(leads::id.desc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let rows = items.load::<DbLead>(&mut conn)?;

        let customer_ids = rows.iter().filter_map(|lead| lead.customer_id).collect();
        let names = customer_names(&mut conn, query.user_id.get(), customer_ids)?;

        let leads = rows
            .into_iter()
            .map(|db_lead| {
                let customer_name = db_lead
                    .customer_id
                    .and_then(|id| names.get(&id).cloned());
                Lead::try_from(db_lead).map(|lead| LeadListItem {
                    lead,
                    customer_name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, leads))
    }

    fn list_leads_by_customer(
        &self,
        customer_id: CustomerId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Lead>> {
        let mut conn = self.conn()?;
        let rows = leads::table
            .filter(leads::customer_id.eq(customer_id.get()))
            .filter(leads::user_id.eq(user_id.get()))
            .order(leads::created_at.desc())
            .load::<DbLead>(&mut conn)?;

        convert_all(rows)
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        let mut conn = self.conn()?;
        let db_new: DbNewLead = new_lead.into();

        let db_lead = diesel::insert_into(leads::table)
            .values(&db_new)
            .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(db_lead).map_err(RepositoryError::from)
    }

    fn update_lead(
        &self,
        id: LeadId,
        user_id: UserId,
        updates: &UpdateLead,
    ) -> RepositoryResult<Lead> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateLead = updates.into();

        let db_lead = diesel::update(
            leads::table
                .filter(leads::id.eq(id.get()))
                .filter(leads::user_id.eq(user_id.get())),
        )
        .set((&db_updates, leads::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(db_lead).map_err(RepositoryError::from)
    }

    fn delete_lead(&self, id: LeadId, user_id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(
            leads::table
                .filter(leads::id.eq(id.get()))
                .filter(leads::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)?;

        ensure_affected(affected)
    }
}
