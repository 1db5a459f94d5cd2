use serde::Deserialize;

use crate::domain::profile::UpdateProfile;
use crate::domain::types::{PhoneNumber, ProfileRole};
use crate::forms::{FormError, blank_to_none};

/// Profile settings edited by the signed-in user.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub phone: String,
}

impl TryFrom<ProfileForm> for UpdateProfile {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        let phone = blank_to_none(&form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(Self {
            full_name: blank_to_none(&form.full_name),
            company_name: blank_to_none(&form.company_name),
            phone,
        })
    }
}

/// Role assignment posted from the admin profiles page.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

impl TryFrom<RoleForm> for ProfileRole {
    type Error = FormError;

    fn try_from(form: RoleForm) -> Result<Self, Self::Error> {
        form.role
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidChoice("role"))
    }
}
