use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::estimate::{
    Estimate, EstimateItem, EstimateListItem, NewEstimate, NewEstimateItem, UpdateEstimate,
};
use crate::domain::types::{EstimateId, LeadId, UserId};
use crate::models::estimate::{
    Estimate as DbEstimate, EstimateItem as DbEstimateItem, NewEstimate as DbNewEstimate,
    NewEstimateItem as DbNewEstimateItem, UpdateEstimate as DbUpdateEstimate,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::lead::{customer_names, lead_projects};
use crate::repository::{
    DieselRepository, EstimateListQuery, EstimateReader, EstimateWriter, convert_all,
    ensure_affected,
};
use crate::schema::{estimate_items, estimates};

fn filtered(query: &EstimateListQuery) -> estimates::BoxedQuery<'_, Sqlite> {
    let mut items = estimates::table
        .filter(estimates::user_id.eq(query.user_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(estimates::status.eq(status.as_str()));
    }

    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            estimates::estimate_number
                .like(pattern.clone())
                .or(estimates::notes.like(pattern)),
        );
    }

    items
}

fn insert_items(
    conn: &mut SqliteConnection,
    estimate_id: i32,
    items: &[NewEstimateItem],
) -> QueryResult<usize> {
    if items.is_empty() {
        return Ok(0);
    }

    let rows: Vec<DbNewEstimateItem> = items
        .iter()
        .map(|item| DbNewEstimateItem::for_estimate(estimate_id, item))
        .collect();

    diesel::insert_into(estimate_items::table)
        .values(&rows)
        .execute(conn)
}

impl EstimateReader for DieselRepository {
    fn get_estimate_by_id(
        &self,
        id: EstimateId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Estimate>> {
        let mut conn = self.conn()?;
        let db_estimate = estimates::table
            .filter(estimates::id.eq(id.get()))
            .filter(estimates::user_id.eq(user_id.get()))
            .first::<DbEstimate>(&mut conn)
            .optional()?;

        db_estimate
            .map(Estimate::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_estimate_items(
        &self,
        estimate_id: EstimateId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<EstimateItem>> {
        let mut conn = self.conn()?;
        let rows = estimate_items::table
            .inner_join(estimates::table)
            .filter(estimate_items::estimate_id.eq(estimate_id.get()))
            .filter(estimates::user_id.eq(user_id.get()))
            .order(estimate_items::id.asc())
            .select(DbEstimateItem::as_select())
            .load::<DbEstimateItem>(&mut conn)?;

        convert_all(rows)
    }

    fn list_estimates(
        &self,
        query: EstimateListQuery,
    ) -> RepositoryResult<(usize, Vec<EstimateListItem>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query)
            .order(estimates::created_at.desc())
            .then_order_by(estimates::id.desc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let rows = items.load::<DbEstimate>(&mut conn)?;

        let user_id = query.user_id.get();
        let lead_ids = rows.iter().map(|estimate| estimate.lead_id).collect();
        let projects = lead_projects(&mut conn, user_id, lead_ids)?;
        let customer_ids = projects
            .values()
            .filter_map(|(_, customer_id)| *customer_id)
            .collect();
        let names = customer_names(&mut conn, user_id, customer_ids)?;

        let estimates = rows
            .into_iter()
            .map(|db_estimate| {
                let (project_name, customer_name) = match projects.get(&db_estimate.lead_id) {
                    Some((project, customer_id)) => (
                        project.clone(),
                        customer_id.and_then(|id| names.get(&id).cloned()),
                    ),
                    None => (String::new(), None),
                };
                Estimate::try_from(db_estimate).map(|estimate| EstimateListItem {
                    estimate,
                    project_name,
                    customer_name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, estimates))
    }

    fn list_estimates_by_lead(
        &self,
        lead_id: LeadId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Estimate>> {
        let mut conn = self.conn()?;
        let rows = estimates::table
            .filter(estimates::lead_id.eq(lead_id.get()))
            .filter(estimates::user_id.eq(user_id.get()))
            .order(estimates::created_at.desc())
            .load::<DbEstimate>(&mut conn)?;

        convert_all(rows)
    }

    fn count_estimates(&self, user_id: UserId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total: i64 = estimates::table
            .filter(estimates::user_id.eq(user_id.get()))
            .count()
            .get_result(&mut conn)?;

        Ok(total as usize)
    }
}

impl EstimateWriter for DieselRepository {
    fn create_estimate(&self, new_estimate: &NewEstimate) -> RepositoryResult<Estimate> {
        let mut conn = self.conn()?;
        let db_new: DbNewEstimate = new_estimate.into();

        let db_estimate = conn.transaction::<DbEstimate, diesel::result::Error, _>(|conn| {
            let estimate = diesel::insert_into(estimates::table)
                .values(&db_new)
                .get_result::<DbEstimate>(conn)?;

            insert_items(conn, estimate.id, &new_estimate.details.items)?;

            Ok(estimate)
        })?;

        Estimate::try_from(db_estimate).map_err(RepositoryError::from)
    }

    fn update_estimate(
        &self,
        id: EstimateId,
        user_id: UserId,
        updates: &UpdateEstimate,
    ) -> RepositoryResult<Estimate> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateEstimate = updates.into();

        let db_estimate = conn.transaction::<DbEstimate, diesel::result::Error, _>(|conn| {
            let estimate = diesel::update(
                estimates::table
                    .filter(estimates::id.eq(id.get()))
                    .filter(estimates::user_id.eq(user_id.get())),
            )
            .set((&db_updates, estimates::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbEstimate>(conn)?;

            diesel::delete(estimate_items::table.filter(estimate_items::estimate_id.eq(estimate.id)))
                .execute(conn)?;
            insert_items(conn, estimate.id, &updates.details.items)?;

            Ok(estimate)
        })?;

        Estimate::try_from(db_estimate).map_err(RepositoryError::from)
    }

    fn delete_estimate(&self, id: EstimateId, user_id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(
            estimates::table
                .filter(estimates::id.eq(id.get()))
                .filter(estimates::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)?;

        ensure_affected(affected)
    }
}
