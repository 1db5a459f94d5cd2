use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::site_visit::{NewSiteVisit, SiteVisit, SiteVisitListItem, UpdateSiteVisit};
use crate::domain::types::{LeadId, SiteVisitId, UserId};
use crate::models::site_visit::{
    NewSiteVisit as DbNewSiteVisit, SiteVisit as DbSiteVisit, UpdateSiteVisit as DbUpdateSiteVisit,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::lead::lead_projects;
use crate::repository::{
    DieselRepository, SiteVisitListQuery, SiteVisitReader, SiteVisitWriter, convert_all,
    ensure_affected,
};
use crate::schema::site_visits;

fn filtered(query: &SiteVisitListQuery) -> site_visits::BoxedQuery<'_, Sqlite> {
    let mut items = site_visits::table
        .filter(site_visits::user_id.eq(query.user_id.get()))
        .into_boxed();

    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            site_visits::notes
                .like(pattern.clone())
                .or(site_visits::measurements.like(pattern)),
        );
    }

    items
}

impl SiteVisitReader for DieselRepository {
    fn get_site_visit_by_id(
        &self,
        id: SiteVisitId,
        user_id: UserId,
    ) -> RepositoryResult<Option<SiteVisit>> {
        let mut conn = self.conn()?;
        let db_visit = site_visits::table
            .filter(site_visits::id.eq(id.get()))
            .filter(site_visits::user_id.eq(user_id.get()))
            .first::<DbSiteVisit>(&mut conn)
            .optional()?;

        db_visit
            .map(SiteVisit::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_site_visits(
        &self,
        query: SiteVisitListQuery,
    ) -> RepositoryResult<(usize, Vec<SiteVisitListItem>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query).order(site_visits::visit_date.desc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let rows = items.load::<DbSiteVisit>(&mut conn)?;

        let lead_ids = rows.iter().map(|visit| visit.lead_id).collect();
        let projects = lead_projects(&mut conn, query.user_id.get(), lead_ids)?;

        let visits = rows
            .into_iter()
            .map(|db_visit| {
                let project_name = projects
                    .get(&db_visit.lead_id)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default();
                SiteVisit::try_from(db_visit).map(|visit| SiteVisitListItem {
                    visit,
                    project_name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, visits))
    }

    fn list_site_visits_by_lead(
        &self,
        lead_id: LeadId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<SiteVisit>> {
        let mut conn = self.conn()?;
        let rows = site_visits::table
            .filter(site_visits::lead_id.eq(lead_id.get()))
            .filter(site_visits::user_id.eq(user_id.get()))
            .order(site_visits::visit_date.desc())
            .load::<DbSiteVisit>(&mut conn)?;

        convert_all(rows)
    }
}

impl SiteVisitWriter for DieselRepository {
    fn create_site_visit(&self, new_visit: &NewSiteVisit) -> RepositoryResult<SiteVisit> {
        let mut conn = self.conn()?;
        let db_new: DbNewSiteVisit = new_visit.into();

        let db_visit = diesel::insert_into(site_visits::table)
            .values(&db_new)
            .get_result::<DbSiteVisit>(&mut conn)?;

        SiteVisit::try_from(db_visit).map_err(RepositoryError::from)
    }

    fn update_site_visit(
        &self,
        id: SiteVisitId,
        user_id: UserId,
        updates: &UpdateSiteVisit,
    ) -> RepositoryResult<SiteVisit> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateSiteVisit = updates.into();

        let db_visit = diesel::update(
            site_visits::table
                .filter(site_visits::id.eq(id.get()))
                .filter(site_visits::user_id.eq(user_id.get())),
        )
        .set((&db_updates, site_visits::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbSiteVisit>(&mut conn)?;

        SiteVisit::try_from(db_visit).map_err(RepositoryError::from)
    }

    fn delete_site_visit(&self, id: SiteVisitId, user_id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(
            site_visits::table
                .filter(site_visits::id.eq(id.get()))
                .filter(site_visits::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)?;

        ensure_affected(affected)
    }
}
