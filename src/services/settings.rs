use crate::domain::profile::{Profile, UpdateProfile};
use crate::forms::settings::ProfileForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::ProfileWriter;
use crate::services::{ServiceResult, current_profile};

/// Returns the caller's profile, creating it on first access.
pub fn load_settings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Profile>
where
    R: ProfileWriter + ?Sized,
{
    current_profile(repo, user)
}

pub fn update_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProfileForm,
) -> ServiceResult<Profile>
where
    R: ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let updates = UpdateProfile::try_from(form)?;

    let profile = repo.update_profile(owner.id, &updates).map_err(|err| {
        log::error!("Failed to update profile {}: {err}", owner.id);
        err
    })?;

    Ok(profile)
}
