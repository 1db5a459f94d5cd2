use crate::domain::profile::Profile;

/// Profiles listed on the admin page, newest first.
pub struct AdminPageData {
    pub profiles: Vec<Profile>,
}
