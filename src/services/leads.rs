use crate::domain::lead::{Lead, LeadDetails};
use crate::domain::types::{LeadId, LeadStatus, UserId};
use crate::dto::IndexQuery;
use crate::dto::leads::{LeadPageData, LeadsPageData};
use crate::forms::leads::{LeadForm, LeadPayload};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, Pagination};
use crate::repository::{
    CustomerListQuery, CustomerReader, EstimateReader, LeadListQuery, LeadReader, LeadWriter,
    ProfileWriter, SiteVisitReader,
};
use crate::services::{ServiceError, ServiceResult, current_profile, parse_status};

/// Loads one page of leads, optionally filtered by status.
pub fn load_leads_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<LeadsPageData>
where
    R: LeadReader + CustomerReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let pagination = Pagination::new(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE);
    let status_filter = parse_status::<LeadStatus>(query.status.as_deref());

    let mut list_query =
        LeadListQuery::new(owner.id).paginate(pagination.page, pagination.per_page);
    if let Some(status) = status_filter {
        list_query = list_query.status(status);
    }

    let (total, leads) = repo.list_leads(list_query).map_err(|err| {
        log::error!("Failed to list leads: {err}");
        err
    })?;
    let (_, customers) = repo.list_customers(CustomerListQuery::new(owner.id))?;

    Ok(LeadsPageData {
        leads: Paginated::new(leads, pagination, total),
        status_filter,
        customers,
    })
}

/// Loads a lead with its site visits and estimates.
pub fn load_lead_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
) -> ServiceResult<LeadPageData>
where
    R: LeadReader + CustomerReader + SiteVisitReader + EstimateReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let lead_id = LeadId::new(lead_id).map_err(|_| ServiceError::NotFound)?;

    let lead = repo
        .get_lead_by_id(lead_id, owner.id)?
        .ok_or(ServiceError::NotFound)?;
    let (_, customers) = repo.list_customers(CustomerListQuery::new(owner.id))?;
    let site_visits = repo.list_site_visits_by_lead(lead_id, owner.id)?;
    let estimates = repo.list_estimates_by_lead(lead_id, owner.id)?;

    Ok(LeadPageData {
        lead,
        customers,
        site_visits,
        estimates,
    })
}

/// Rejects a customer link pointing outside the caller's records.
fn check_customer<R>(repo: &R, details: &LeadDetails, user_id: UserId) -> ServiceResult<()>
where
    R: CustomerReader + ?Sized,
{
    if let Some(customer_id) = details.customer_id
        && repo.get_customer_by_id(customer_id, user_id)?.is_none()
    {
        return Err(ServiceError::Form("Selected customer does not exist".to_string()));
    }
    Ok(())
}

pub fn add_lead<R>(repo: &R, user: &AuthenticatedUser, form: LeadForm) -> ServiceResult<Lead>
where
    R: LeadWriter + CustomerReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let payload = LeadPayload::try_from(form)?;
    check_customer(repo, &payload.details, owner.id)?;

    let lead = repo.create_lead(&payload.into_new(owner.id)).map_err(|err| {
        log::error!("Failed to add a lead: {err}");
        err
    })?;

    Ok(lead)
}

pub fn update_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
    form: LeadForm,
) -> ServiceResult<Lead>
where
    R: LeadWriter + CustomerReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let lead_id = LeadId::new(lead_id).map_err(|_| ServiceError::NotFound)?;
    let payload = LeadPayload::try_from(form)?;
    check_customer(repo, &payload.details, owner.id)?;

    let lead = repo
        .update_lead(lead_id, owner.id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update lead {lead_id}: {err}");
            err
        })?;

    Ok(lead)
}

/// Deletes a lead together with its site visits and estimates.
pub fn delete_lead<R>(repo: &R, user: &AuthenticatedUser, lead_id: i32) -> ServiceResult<()>
where
    R: LeadWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let lead_id = LeadId::new(lead_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_lead(lead_id, owner.id).map_err(|err| {
        log::error!("Failed to delete lead {lead_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::services::test_support::{lead, member_user, repo_for_profile};

    fn form(customer_id: &str) -> LeadForm {
        LeadForm {
            customer_id: customer_id.into(),
            project_name: "Bathroom refresh".into(),
            description: "".into(),
            status: "".into(),
            estimated_value: "".into(),
        }
    }

    #[test]
    fn status_filter_is_applied() {
        let mut repo = repo_for_profile(7);
        repo.expect_list_leads()
            .withf(|query| query.status == Some(LeadStatus::Qualified))
            .times(1)
            .returning(|_| Ok((1, vec![])));
        repo.expect_list_customers().returning(|_| Ok((0, vec![])));

        let data = load_leads_page(
            &repo,
            &member_user(),
            IndexQuery {
                status: Some("qualified".into()),
                ..IndexQuery::default()
            },
        )
        .unwrap();
        assert_eq!(data.status_filter, Some(LeadStatus::Qualified));
    }

    #[test]
    fn foreign_customer_is_rejected() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_customer_by_id()
            .withf(|_, user_id| user_id.get() == 7)
            .returning(|_, _| Ok(None));
        repo.expect_create_lead().times(0);

        let result = add_lead(&repo, &member_user(), form("12"));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn lead_without_customer_is_created() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_customer_by_id().times(0);
        repo.expect_create_lead()
            .withf(|new| new.user_id.get() == 7 && new.details.status == LeadStatus::New)
            .times(1)
            .returning(|_| Ok(lead(1)));

        let created = add_lead(&repo, &member_user(), form("")).unwrap();
        assert_eq!(created.id.get(), 1);
    }

    #[test]
    fn update_of_missing_lead_is_not_found() {
        let mut repo = repo_for_profile(7);
        repo.expect_update_lead()
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let result = update_lead(&repo, &member_user(), 5, form(""));
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
