use crate::domain::site_visit::SiteVisit;
use crate::domain::types::{LeadId, SiteVisitId, UserId};
use crate::dto::IndexQuery;
use crate::dto::site_visits::{SiteVisitPageData, SiteVisitsPageData};
use crate::forms::site_visits::{SiteVisitForm, SiteVisitPayload};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, Pagination};
use crate::repository::{
    LeadListQuery, LeadReader, ProfileWriter, SiteVisitListQuery, SiteVisitReader,
    SiteVisitWriter,
};
use crate::services::{ServiceError, ServiceResult, current_profile};

pub fn load_site_visits_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<SiteVisitsPageData>
where
    R: SiteVisitReader + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let pagination = Pagination::new(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE);

    let (total, visits) = repo
        .list_site_visits(
            SiteVisitListQuery::new(owner.id).paginate(pagination.page, pagination.per_page),
        )
        .map_err(|err| {
            log::error!("Failed to list site visits: {err}");
            err
        })?;
    let (_, leads) = repo.list_leads(LeadListQuery::new(owner.id))?;

    Ok(SiteVisitsPageData {
        visits: Paginated::new(visits, pagination, total),
        leads,
    })
}

pub fn load_site_visit_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    visit_id: i32,
) -> ServiceResult<SiteVisitPageData>
where
    R: SiteVisitReader + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let visit_id = SiteVisitId::new(visit_id).map_err(|_| ServiceError::NotFound)?;

    let visit = repo
        .get_site_visit_by_id(visit_id, owner.id)?
        .ok_or(ServiceError::NotFound)?;
    let (_, leads) = repo.list_leads(LeadListQuery::new(owner.id))?;

    Ok(SiteVisitPageData { visit, leads })
}

fn check_lead<R>(repo: &R, lead_id: LeadId, user_id: UserId) -> ServiceResult<()>
where
    R: LeadReader + ?Sized,
{
    match repo.get_lead_by_id(lead_id, user_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::Form("Selected lead does not exist".to_string())),
    }
}

pub fn add_site_visit<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SiteVisitForm,
) -> ServiceResult<SiteVisit>
where
    R: SiteVisitWriter + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let payload = SiteVisitPayload::try_from(form)?;
    check_lead(repo, payload.details.lead_id, owner.id)?;

    let visit = repo
        .create_site_visit(&payload.into_new(owner.id))
        .map_err(|err| {
            log::error!("Failed to schedule a site visit: {err}");
            err
        })?;

    Ok(visit)
}

pub fn update_site_visit<R>(
    repo: &R,
    user: &AuthenticatedUser,
    visit_id: i32,
    form: SiteVisitForm,
) -> ServiceResult<SiteVisit>
where
    R: SiteVisitWriter + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let visit_id = SiteVisitId::new(visit_id).map_err(|_| ServiceError::NotFound)?;
    let payload = SiteVisitPayload::try_from(form)?;
    check_lead(repo, payload.details.lead_id, owner.id)?;

    let visit = repo
        .update_site_visit(visit_id, owner.id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update site visit {visit_id}: {err}");
            err
        })?;

    Ok(visit)
}

pub fn delete_site_visit<R>(repo: &R, user: &AuthenticatedUser, visit_id: i32) -> ServiceResult<()>
where
    R: SiteVisitWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let visit_id = SiteVisitId::new(visit_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_site_visit(visit_id, owner.id).map_err(|err| {
        log::error!("Failed to delete site visit {visit_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::services::test_support::{lead, member_user, repo_for_profile};

    fn form() -> SiteVisitForm {
        SiteVisitForm {
            lead_id: 4,
            visit_date: "2025-05-02".into(),
            visit_time: "".into(),
            notes: "".into(),
            measurements: "12x14 ft".into(),
        }
    }

    fn visit() -> SiteVisit {
        let now = Utc::now().naive_utc();
        SiteVisit {
            id: SiteVisitId::new(2).unwrap(),
            user_id: UserId::new(7).unwrap(),
            lead_id: LeadId::new(4).unwrap(),
            visit_date: now,
            notes: None,
            measurements: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn visit_for_unknown_lead_is_rejected() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_lead_by_id().returning(|_, _| Ok(None));
        repo.expect_create_site_visit().times(0);

        let result = add_site_visit(&repo, &member_user(), form());
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn update_checks_lead_then_writes() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_lead_by_id()
            .returning(|_, _| Ok(Some(lead(4))));
        repo.expect_update_site_visit()
            .withf(|id, user_id, update| {
                id.get() == 2 && user_id.get() == 7 && update.details.measurements.is_some()
            })
            .times(1)
            .returning(|_, _, _| Ok(visit()));

        assert!(update_site_visit(&repo, &member_user(), 2, form()).is_ok());
    }
}
