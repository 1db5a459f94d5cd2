use crate::domain::material::Material;
use crate::domain::types::{JobId, MaterialId};
use crate::forms::materials::MaterialForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{JobReader, MaterialWriter, ProfileWriter};
use crate::services::{ServiceError, ServiceResult, current_profile};

/// Adds a material to one of the caller's jobs.
pub fn add_material<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
    form: MaterialForm,
) -> ServiceResult<Material>
where
    R: MaterialWriter + JobReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let job_id = JobId::new(job_id).map_err(|_| ServiceError::NotFound)?;

    if repo.get_job_by_id(job_id, owner.id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let new_material = form.into_new(owner.id, job_id)?;
    let material = repo.create_material(&new_material).map_err(|err| {
        log::error!("Failed to add material to job {job_id}: {err}");
        err
    })?;

    Ok(material)
}

/// Removes a material listed under `job_id`.
pub fn delete_material<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
    material_id: i32,
) -> ServiceResult<()>
where
    R: MaterialWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let job_id = JobId::new(job_id).map_err(|_| ServiceError::NotFound)?;
    let material_id = MaterialId::new(material_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_material(material_id, job_id, owner.id).map_err(|err| {
        log::error!("Failed to delete material {material_id} of job {job_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{MaterialName, UserId};
    use crate::repository::errors::RepositoryError;
    use crate::services::test_support::{d, job, member_user, repo_for_profile};

    fn form() -> MaterialForm {
        MaterialForm {
            name: "Drywall".into(),
            quantity: "24".into(),
            cost_per_unit: "12.75".into(),
            ..MaterialForm::default()
        }
    }

    #[test]
    fn material_on_foreign_job_is_not_found() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_job_by_id().returning(|_, _| Ok(None));
        repo.expect_create_material().times(0);

        let result = add_material(&repo, &member_user(), 4, form());
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn material_total_is_computed_before_insert() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_job_by_id().returning(|_, _| Ok(Some(job(4))));
        repo.expect_create_material()
            .withf(|new| new.job_id.get() == 4 && new.total_cost == d("306.00"))
            .times(1)
            .returning(|new| {
                Ok(Material {
                    id: MaterialId::new(1).unwrap(),
                    user_id: UserId::new(7).unwrap(),
                    job_id: new.job_id,
                    name: MaterialName::new("Drywall").unwrap(),
                    quantity: new.quantity,
                    unit: None,
                    cost_per_unit: new.cost_per_unit,
                    total_cost: new.total_cost,
                    supplier: None,
                    delivery_date: None,
                    notes: None,
                    created_at: Utc::now().naive_utc(),
                })
            });

        let material = add_material(&repo, &member_user(), 4, form()).unwrap();
        assert_eq!(material.total_cost, d("306.00"));
    }

    #[test]
    fn material_is_deleted_through_its_job() {
        let mut repo = repo_for_profile(7);
        repo.expect_delete_material()
            .withf(|id, job_id, user_id| id.get() == 3 && job_id.get() == 4 && user_id.get() == 7)
            .times(1)
            .returning(|_, _, _| Ok(()));

        assert!(delete_material(&repo, &member_user(), 4, 3).is_ok());
    }

    #[test]
    fn material_under_other_job_is_not_found() {
        let mut repo = repo_for_profile(7);
        repo.expect_delete_material()
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let result = delete_material(&repo, &member_user(), 5, 3);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
