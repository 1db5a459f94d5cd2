use crate::domain::estimate::Estimate;
use crate::domain::types::{DocumentNumber, EstimateId, EstimateStatus, LeadId, UserId};
use crate::dto::IndexQuery;
use crate::dto::estimates::{EstimatePageData, EstimatesPageData, NewEstimatePageData};
use crate::forms::estimates::{EstimateForm, EstimatePayload};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, Pagination};
use crate::repository::{
    EstimateListQuery, EstimateReader, EstimateWriter, LeadListQuery, LeadReader, ProfileWriter,
};
use crate::services::{ServiceError, ServiceResult, current_profile, parse_status};

pub fn load_estimates_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<EstimatesPageData>
where
    R: EstimateReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let pagination = Pagination::new(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE);
    let status_filter = parse_status::<EstimateStatus>(query.status.as_deref());

    let mut list_query =
        EstimateListQuery::new(owner.id).paginate(pagination.page, pagination.per_page);
    if let Some(status) = status_filter {
        list_query = list_query.status(status);
    }

    let (total, estimates) = repo.list_estimates(list_query).map_err(|err| {
        log::error!("Failed to list estimates: {err}");
        err
    })?;

    Ok(EstimatesPageData {
        estimates: Paginated::new(estimates, pagination, total),
        status_filter,
    })
}

/// Prepares the blank estimate form, suggesting `<prefix>-NNN` as number.
pub fn load_new_estimate_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    prefix: &str,
) -> ServiceResult<NewEstimatePageData>
where
    R: EstimateReader + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let existing = repo.count_estimates(owner.id)?;
    let (_, leads) = repo.list_leads(LeadListQuery::new(owner.id))?;

    Ok(NewEstimatePageData {
        suggested_number: DocumentNumber::suggest(prefix, existing),
        leads,
    })
}

pub fn load_estimate_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    estimate_id: i32,
) -> ServiceResult<EstimatePageData>
where
    R: EstimateReader + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let estimate_id = EstimateId::new(estimate_id).map_err(|_| ServiceError::NotFound)?;

    let estimate = repo
        .get_estimate_by_id(estimate_id, owner.id)?
        .ok_or(ServiceError::NotFound)?;
    let items = repo.list_estimate_items(estimate_id, owner.id)?;
    let (_, leads) = repo.list_leads(LeadListQuery::new(owner.id))?;

    Ok(EstimatePageData {
        estimate,
        items,
        leads,
    })
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

/// Creates an estimate from a form body with repeated item keys.
pub fn add_estimate<R>(repo: &R, user: &AuthenticatedUser, body: &[u8]) -> ServiceResult<Estimate>
where
    R: EstimateWriter + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let payload = EstimatePayload::try_from(EstimateForm::from_bytes(body)?)?;
    check_lead(repo, payload.details.lead_id, owner.id)?;

    let estimate = repo
        .create_estimate(&payload.into_new(owner.id))
        .map_err(|err| {
            log::error!("Failed to add an estimate: {err}");
            err
        })?;

    Ok(estimate)
}

/// Updates an estimate, replacing its whole item set.
pub fn update_estimate<R>(
    repo: &R,
    user: &AuthenticatedUser,
    estimate_id: i32,
    body: &[u8],
) -> ServiceResult<Estimate>
where
    R: EstimateWriter + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let estimate_id = EstimateId::new(estimate_id).map_err(|_| ServiceError::NotFound)?;
    let payload = EstimatePayload::try_from(EstimateForm::from_bytes(body)?)?;
    check_lead(repo, payload.details.lead_id, owner.id)?;

    let estimate = repo
        .update_estimate(estimate_id, owner.id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update estimate {estimate_id}: {err}");
            err
        })?;

    Ok(estimate)
}

pub fn delete_estimate<R>(
    repo: &R,
    user: &AuthenticatedUser,
    estimate_id: i32,
) -> ServiceResult<()>
where
    R: EstimateWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let estimate_id = EstimateId::new(estimate_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_estimate(estimate_id, owner.id).map_err(|err| {
        log::error!("Failed to delete estimate {estimate_id}: {err}");
        err
    })?;

    Ok(())
}
