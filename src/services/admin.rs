use crate::SERVICE_ADMIN_ROLE;
use crate::domain::profile::Profile;
use crate::domain::types::{ProfileRole, UserId};
use crate::dto::admin::AdminPageData;
use crate::forms::settings::RoleForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ProfileReader, ProfileWriter};
use crate::services::{ServiceError, ServiceResult, current_profile, ensure_role};

/// Lists every profile for administrators.
pub fn load_admin_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<AdminPageData>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    current_profile(repo, user)?;

    let profiles = repo.list_profiles().map_err(|err| {
        log::error!("Failed to list profiles: {err}");
        err
    })?;

    Ok(AdminPageData { profiles })
}

/// Changes the role recorded on a profile.
pub fn update_profile_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    profile_id: i32,
    form: RoleForm,
) -> ServiceResult<Profile>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let profile_id = UserId::new(profile_id).map_err(|_| ServiceError::NotFound)?;
    let role = ProfileRole::try_from(form)?;

    if repo.get_profile_by_id(profile_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let profile = repo.update_profile_role(profile_id, role).map_err(|err| {
        log::error!("Failed to set role of profile {profile_id}: {err}");
        err
    })?;

    log::info!("{} set role of profile {profile_id} to {role}", user.email);
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, member_user, profile, repo_for_profile};

    #[test]
    fn members_cannot_open_admin_page() {
        let mut repo = MockRepository::new();
        repo.expect_ensure_profile().times(0);
        repo.expect_list_profiles().times(0);

        let result = load_admin_page(&repo, &member_user());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn admins_list_profiles() {
        let mut repo = repo_for_profile(1);
        repo.expect_list_profiles()
            .times(1)
            .returning(|| Ok(vec![profile(1), profile(2)]));

        let data = load_admin_page(&repo, &admin_user()).unwrap();
        assert_eq!(data.profiles.len(), 2);
    }

    #[test]
    fn admins_change_roles() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_id()
            .returning(|id| Ok(Some(profile(id.get()))));
        repo.expect_update_profile_role()
            .withf(|id, role| id.get() == 2 && *role == ProfileRole::Estimator)
            .times(1)
            .returning(|_, _| Ok(profile(2)));

        let form = RoleForm {
            role: "estimator".into(),
        };
        assert!(update_profile_role(&repo, &admin_user(), 2, form).is_ok());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_update_profile_role().times(0);

        let form = RoleForm {
            role: "owner".into(),
        };
        let result = update_profile_role(&repo, &admin_user(), 2, form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn role_of_missing_profile_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_id().returning(|_| Ok(None));
        repo.expect_update_profile_role().times(0);

        let form = RoleForm {
            role: "estimator".into(),
        };
        let result = update_profile_role(&repo, &admin_user(), 9, form);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
