use diesel::prelude::*;

use crate::domain::profile::{NewProfile, Profile, UpdateProfile};
use crate::domain::types::{ProfileRole, UserId};
use crate::models::profile::{
    NewProfile as DbNewProfile, Profile as DbProfile, UpdateProfile as DbUpdateProfile,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProfileReader, ProfileWriter, convert_all};
use crate::schema::profiles;

impl ProfileReader for DieselRepository {
    fn get_profile_by_id(&self, id: UserId) -> RepositoryResult<Option<Profile>> {
        let mut conn = self.conn()?;
        let db_profile = profiles::table
            .find(id.get())
            .first::<DbProfile>(&mut conn)
            .optional()?;

        db_profile
            .map(Profile::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_profiles(&self) -> RepositoryResult<Vec<Profile>> {
        let mut conn = self.conn()?;
        let rows = profiles::table
            .order(profiles::created_at.desc())
            .then_order_by(profiles::id.desc())
            .load::<DbProfile>(&mut conn)?;

        convert_all(rows)
    }
}

impl ProfileWriter for DieselRepository {
    fn ensure_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile> {
        let mut conn = self.conn()?;
        let db_new: DbNewProfile = new_profile.into();

        let db_profile = conn.transaction::<DbProfile, diesel::result::Error, _>(|conn| {
            let existing = profiles::table
                .filter(profiles::email.eq(db_new.email))
                .first::<DbProfile>(conn)
                .optional()?;

            match existing {
                Some(profile) => Ok(profile),
                None => diesel::insert_into(profiles::table)
                    .values(&db_new)
                    .get_result::<DbProfile>(conn),
            }
        })?;

        Profile::try_from(db_profile).map_err(RepositoryError::from)
    }

    fn update_profile(&self, id: UserId, updates: &UpdateProfile) -> RepositoryResult<Profile> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateProfile = updates.into();

        let db_profile = diesel::update(profiles::table.find(id.get()))
            .set((&db_updates, profiles::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbProfile>(&mut conn)?;

        Profile::try_from(db_profile).map_err(RepositoryError::from)
    }

    fn update_profile_role(&self, id: UserId, role: ProfileRole) -> RepositoryResult<Profile> {
        let mut conn = self.conn()?;

        let db_profile = diesel::update(profiles::table.find(id.get()))
            .set((
                profiles::role.eq(role.as_str()),
                profiles::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<DbProfile>(&mut conn)?;

        Profile::try_from(db_profile).map_err(RepositoryError::from)
    }
}
