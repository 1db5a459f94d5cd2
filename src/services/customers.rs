use crate::domain::customer::Customer;
use crate::domain::types::CustomerId;
use crate::dto::IndexQuery;
use crate::dto::customers::{CustomerPageData, CustomersPageData};
use crate::forms::customers::{CustomerForm, CustomerPayload, UploadCustomersForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, Pagination};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, LeadReader, ProfileWriter,
};
use crate::services::{ServiceError, ServiceResult, current_profile, normalize_search};

/// Loads one page of the caller's customers, optionally filtered by search.
pub fn load_customers_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<CustomersPageData>
where
    R: CustomerReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let pagination = Pagination::new(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE);
    let search_query = normalize_search(query.search);

    let mut list_query =
        CustomerListQuery::new(owner.id).paginate(pagination.page, pagination.per_page);
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, customers) = repo.list_customers(list_query).map_err(|err| {
        log::error!("Failed to list customers: {err}");
        err
    })?;

    Ok(CustomersPageData {
        customers: Paginated::new(customers, pagination, total),
        search_query,
    })
}

/// Loads a customer with the leads recorded for it.
pub fn load_customer_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
) -> ServiceResult<CustomerPageData>
where
    R: CustomerReader + LeadReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let customer_id = CustomerId::new(customer_id).map_err(|_| ServiceError::NotFound)?;

    let customer = repo
        .get_customer_by_id(customer_id, owner.id)?
        .ok_or(ServiceError::NotFound)?;
    let leads = repo.list_leads_by_customer(customer_id, owner.id)?;

    Ok(CustomerPageData { customer, leads })
}

pub fn add_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let payload = CustomerPayload::try_from(form)?;

    let customer = repo
        .create_customer(&payload.into_new(owner.id))
        .map_err(|err| {
            log::error!("Failed to add a customer: {err}");
            err
        })?;

    Ok(customer)
}

pub fn update_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let customer_id = CustomerId::new(customer_id).map_err(|_| ServiceError::NotFound)?;
    let payload = CustomerPayload::try_from(form)?;

    let customer = repo
        .update_customer(customer_id, owner.id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update customer {customer_id}: {err}");
            err
        })?;

    Ok(customer)
}

/// Deletes a customer; its leads keep their history but lose the link.
pub fn delete_customer<R>(repo: &R, user: &AuthenticatedUser, customer_id: i32) -> ServiceResult<()>
where
    R: CustomerWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let customer_id = CustomerId::new(customer_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_customer(customer_id, owner.id).map_err(|err| {
        log::error!("Failed to delete customer {customer_id}: {err}");
        err
    })?;

    Ok(())
}

/// Parses the uploaded CSV file and creates customers in bulk.
pub fn upload_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadCustomersForm,
) -> ServiceResult<usize>
where
    R: CustomerWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let customers = form.parse(owner.id).map_err(|err| {
        log::error!("Failed to parse customers: {err}");
        ServiceError::from(err)
    })?;

    let inserted = repo.create_customers(&customers).map_err(|err| {
        log::error!("Failed to add customers: {err}");
        err
    })?;

    log::info!("Imported {inserted} customers for profile {}", owner.id);
    Ok(inserted)
}
