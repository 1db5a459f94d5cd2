//! Business operations invoked by the HTTP routes.
//!
//! Services check roles, convert forms into domain values and call the
//! repository traits. They never touch actix types, which keeps them testable
//! against the mock repository.

use crate::domain::profile::{NewProfile, Profile};
use crate::domain::types::{Email, ProfileRole};
use crate::models::auth::{AuthenticatedUser, check_role};
use crate::repository::ProfileWriter;
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub mod admin;
pub mod api;
pub mod customers;
pub mod dashboard;
pub mod errors;
pub mod estimates;
pub mod invoices;
pub mod jobs;
pub mod leads;
pub mod materials;
pub mod payments;
pub mod reports;
pub mod settings;
pub mod site_visits;

pub use errors::{ServiceError, ServiceResult};

/// Fails with `Unauthorized` unless the user carries `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Resolves the profile owning the caller's records, creating it on first
/// access. Also checks the service access role.
pub fn current_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Profile>
where
    R: ProfileWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let email = Email::new(user.email.as_str()).map_err(|err| {
        log::warn!("Token for {} carries an invalid email: {err}", user.sub);
        ServiceError::Unauthorized
    })?;
    let role = if check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        ProfileRole::Admin
    } else {
        ProfileRole::default()
    };
    let new_profile = NewProfile::new(email, Some(user.name.clone()), role);

    repo.ensure_profile(&new_profile).map_err(|err| {
        log::error!("Failed to ensure profile: {err}");
        ServiceError::from(err)
    })
}

/// Trims a search term, dropping it when blank.
pub(crate) fn normalize_search(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parses a status filter from the query string; unknown values are ignored.
pub(crate) fn parse_status<S: std::str::FromStr>(status: Option<&str>) -> Option<S> {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}
