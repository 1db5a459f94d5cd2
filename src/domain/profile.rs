//! Application-side record of an authenticated user.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, PhoneNumber, ProfileRole, UserId};

/// Profile row; its id scopes every business record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub email: Email,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<PhoneNumber>,
    pub role: ProfileRole,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Profile {
    /// Name shown in the navigation bar.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(self.email.as_str())
    }
}

/// Data required to create a profile on first sign-in.
#[derive(Clone, Debug, Deserialize)]
pub struct NewProfile {
    pub email: Email,
    pub full_name: Option<String>,
    pub role: ProfileRole,
}

impl NewProfile {
    #[must_use]
    pub fn new(email: Email, full_name: Option<String>, role: ProfileRole) -> Self {
        Self {
            email,
            full_name: full_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            role,
        }
    }
}

/// Editable profile settings.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<PhoneNumber>,
}
