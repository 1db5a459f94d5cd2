use diesel::prelude::*;

use crate::domain::material::{Material, NewMaterial};
use crate::domain::types::{JobId, MaterialId, UserId};
use crate::models::material::{Material as DbMaterial, NewMaterial as DbNewMaterial};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, MaterialReader, MaterialWriter, convert_all, ensure_affected,
};
use crate::schema::materials;

impl MaterialReader for DieselRepository {
    fn list_materials_by_job(
        &self,
        job_id: JobId,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Material>> {
        let mut conn = self.conn()?;
        let rows = materials::table
            .filter(materials::job_id.eq(job_id.get()))
            .filter(materials::user_id.eq(user_id.get()))
            .order(materials::created_at.desc())
            .then_order_by(materials::id.desc())
            .load::<DbMaterial>(&mut conn)?;

        convert_all(rows)
    }
}

impl MaterialWriter for DieselRepository {
    fn create_material(&self, new_material: &NewMaterial) -> RepositoryResult<Material> {
        let mut conn = self.conn()?;
        let db_new: DbNewMaterial = new_material.into();

        let db_material = diesel::insert_into(materials::table)
            .values(&db_new)
            .get_result::<DbMaterial>(&mut conn)?;

        Material::try_from(db_material).map_err(RepositoryError::from)
    }

    fn delete_material(
        &self,
        id: MaterialId,
        job_id: JobId,
        user_id: UserId,
    ) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(
            materials::table
                .filter(materials::id.eq(id.get()))
                .filter(materials::job_id.eq(job_id.get()))
                .filter(materials::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)?;

        ensure_affected(affected)
    }
}
