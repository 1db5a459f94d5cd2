use crate::dto::api::{CustomersQuery, CustomersResponse};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{CustomerListQuery, CustomerReader, ProfileWriter};
use crate::services::{ServiceResult, current_profile, normalize_search};

/// Lists the caller's customers for the JSON API.
pub fn list_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CustomersQuery,
) -> ServiceResult<CustomersResponse>
where
    R: CustomerReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let mut list_query = CustomerListQuery::new(owner.id);
    if let Some(page) = query.page {
        list_query = list_query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    }
    if let Some(term) = normalize_search(query.query) {
        list_query = list_query.search(term);
    }

    let (total, customers) = repo.list_customers(list_query).map_err(|err| {
        log::error!("Failed to list customers: {err}");
        err
    })?;

    Ok(CustomersResponse { total, customers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_support::{customer, member_user, outsider_user, repo_for_profile};

    #[test]
    fn returns_all_matches_without_page() {
        let mut repo = repo_for_profile(7);
        repo.expect_list_customers()
            .withf(|query| query.pagination.is_none() && query.search.as_deref() == Some("jane"))
            .times(1)
            .returning(|_| Ok((1, vec![customer(1)])));

        let response = list_customers(
            &repo,
            &member_user(),
            CustomersQuery {
                query: Some("jane".into()),
                page: None,
            },
        )
        .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.customers.len(), 1);
    }

    #[test]
    fn outsiders_are_unauthorized() {
        let repo = MockRepository::new();
        let result = list_customers(&repo, &outsider_user(), CustomersQuery::default());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
