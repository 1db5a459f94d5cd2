use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::job::{Job, JobListItem, NewJob, UpdateJob};
use crate::domain::types::{JobId, UserId};
use crate::models::job::{Job as DbJob, NewJob as DbNewJob, UpdateJob as DbUpdateJob};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::lead::lead_projects;
use crate::repository::{
    DieselRepository, JobListQuery, JobReader, JobWriter, ensure_affected,
};
use crate::schema::{estimates, jobs};

fn filtered(query: &JobListQuery) -> jobs::BoxedQuery<'_, Sqlite> {
    let mut items = jobs::table
        .filter(jobs::user_id.eq(query.user_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(jobs::status.eq(status.as_str()));
    }

    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            jobs::job_number
                .like(pattern.clone())
                .or(jobs::notes.like(pattern)),
        );
    }

    items
}

/// Loads `id -> (estimate number, lead id)` for the given estimates.
fn estimate_refs(
    conn: &mut SqliteConnection,
    user_id: i32,
    estimate_ids: Vec<i32>,
) -> QueryResult<HashMap<i32, (String, i32)>> {
    if estimate_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let refs = estimates::table
        .filter(estimates::user_id.eq(user_id))
        .filter(estimates::id.eq_any(estimate_ids))
        .select((estimates::id, estimates::estimate_number, estimates::lead_id))
        .load::<(i32, String, i32)>(conn)?;

    Ok(refs
        .into_iter()
        .map(|(id, number, lead_id)| (id, (number, lead_id)))
        .collect())
}

impl JobReader for DieselRepository {
    fn get_job_by_id(&self, id: JobId, user_id: UserId) -> RepositoryResult<Option<Job>> {
        let mut conn = self.conn()?;
        let db_job = jobs::table
            .filter(jobs::id.eq(id.get()))
            .filter(jobs::user_id.eq(user_id.get()))
            .first::<DbJob>(&mut conn)
            .optional()?;

        db_job
            .map(Job::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<JobListItem>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query)
            .order(jobs::created_at.desc())
            .then_order_by(jobs::id.desc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let rows = items.load::<DbJob>(&mut conn)?;

        let user_id = query.user_id.get();
        let estimate_ids = rows.iter().map(|job| job.estimate_id).collect();
        let refs = estimate_refs(&mut conn, user_id, estimate_ids)?;
        let lead_ids = refs.values().map(|(_, lead_id)| *lead_id).collect();
        let projects = lead_projects(&mut conn, user_id, lead_ids)?;

        let jobs = rows
            .into_iter()
            .map(|db_job| {
                let (estimate_number, project_name) = match refs.get(&db_job.estimate_id) {
                    Some((number, lead_id)) => (
                        number.clone(),
                        projects.get(lead_id).map(|(name, _)| name.clone()),
                    ),
                    None => (String::new(), None),
                };
                Job::try_from(db_job).map(|job| JobListItem {
                    job,
                    estimate_number,
                    project_name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, jobs))
    }

    fn count_jobs(&self, user_id: UserId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total: i64 = jobs::table
            .filter(jobs::user_id.eq(user_id.get()))
            .count()
            .get_result(&mut conn)?;

        Ok(total as usize)
    }
}

impl JobWriter for DieselRepository {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job> {
        let mut conn = self.conn()?;
        let db_new: DbNewJob = new_job.into();

        let db_job = diesel::insert_into(jobs::table)
            .values(&db_new)
            .get_result::<DbJob>(&mut conn)?;

        Job::try_from(db_job).map_err(RepositoryError::from)
    }

    fn update_job(&self, id: JobId, user_id: UserId, updates: &UpdateJob) -> RepositoryResult<Job> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateJob = updates.into();

        let db_job = diesel::update(
            jobs::table
                .filter(jobs::id.eq(id.get()))
                .filter(jobs::user_id.eq(user_id.get())),
        )
        .set((&db_updates, jobs::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbJob>(&mut conn)?;

        Job::try_from(db_job).map_err(RepositoryError::from)
    }

    fn delete_job(&self, id: JobId, user_id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(
            jobs::table
                .filter(jobs::id.eq(id.get()))
                .filter(jobs::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)?;

        ensure_affected(affected)
    }
}
