//! Diesel models for user profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{
    NewProfile as DomainNewProfile, Profile as DomainProfile,
    UpdateProfile as DomainUpdateProfile,
};
use crate::domain::types::{Email, PhoneNumber, ProfileRole, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
/// Diesel model for [`crate::domain::profile::Profile`].
pub struct Profile {
    pub id: i32,
    pub email: String,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile<'a> {
    pub email: &'a str,
    pub full_name: Option<&'a str>,
    pub role: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProfile<'a> {
    pub full_name: Option<&'a str>,
    pub company_name: Option<&'a str>,
    pub phone: Option<&'a str>,
}

impl TryFrom<Profile> for DomainProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(profile.id)?,
            email: Email::new(profile.email)?,
            full_name: profile.full_name,
            company_name: profile.company_name,
            phone: profile.phone.map(PhoneNumber::new).transpose()?,
            role: ProfileRole::try_from(profile.role)?,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProfile> for NewProfile<'a> {
    fn from(profile: &'a DomainNewProfile) -> Self {
        Self {
            email: profile.email.as_str(),
            full_name: profile.full_name.as_deref(),
            role: profile.role.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProfile> for UpdateProfile<'a> {
    fn from(profile: &'a DomainUpdateProfile) -> Self {
        Self {
            full_name: profile.full_name.as_deref(),
            company_name: profile.company_name.as_deref(),
            phone: profile.phone.as_ref().map(|p| p.as_str()),
        }
    }
}
