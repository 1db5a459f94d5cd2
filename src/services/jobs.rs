use crate::domain::job::Job;
use crate::domain::material::materials_total;
use crate::domain::types::{DocumentNumber, EstimateId, JobId, JobStatus, UserId};
use crate::dto::IndexQuery;
use crate::dto::jobs::{JobPageData, JobsPageData};
use crate::forms::jobs::{JobForm, JobPayload};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, Pagination};
use crate::repository::{
    EstimateListQuery, EstimateReader, InvoiceReader, JobListQuery, JobReader, JobWriter,
    MaterialReader, ProfileWriter,
};
use crate::services::{ServiceError, ServiceResult, current_profile, parse_status};

/// Loads one page of jobs and the data backing the add form.
pub fn load_jobs_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
    prefix: &str,
) -> ServiceResult<JobsPageData>
where
    R: JobReader + EstimateReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;

    let pagination = Pagination::new(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE);
    let status_filter = parse_status::<JobStatus>(query.status.as_deref());

    let mut list_query = JobListQuery::new(owner.id).paginate(pagination.page, pagination.per_page);
    if let Some(status) = status_filter {
        list_query = list_query.status(status);
    }

    let (total, jobs) = repo.list_jobs(list_query).map_err(|err| {
        log::error!("Failed to list jobs: {err}");
        err
    })?;
    let (_, estimates) = repo.list_estimates(EstimateListQuery::new(owner.id))?;
    let existing = repo.count_jobs(owner.id)?;

    Ok(JobsPageData {
        jobs: Paginated::new(jobs, pagination, total),
        status_filter,
        estimates,
        suggested_number: DocumentNumber::suggest(prefix, existing),
    })
}

/// Loads a job with its materials and invoices.
pub fn load_job_page<R>(repo: &R, user: &AuthenticatedUser, job_id: i32) -> ServiceResult<JobPageData>
where
    R: JobReader + EstimateReader + MaterialReader + InvoiceReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let job_id = JobId::new(job_id).map_err(|_| ServiceError::NotFound)?;

    let job = repo
        .get_job_by_id(job_id, owner.id)?
        .ok_or(ServiceError::NotFound)?;
    let (_, estimates) = repo.list_estimates(EstimateListQuery::new(owner.id))?;
    let materials = repo.list_materials_by_job(job_id, owner.id)?;
    let invoices = repo.list_invoices_by_job(job_id, owner.id)?;

    Ok(JobPageData {
        job,
        estimates,
        materials_total: materials_total(&materials),
        materials,
        invoices,
    })
}

fn check_estimate<R>(repo: &R, estimate_id: EstimateId, user_id: UserId) -> ServiceResult<()>
where
    R: EstimateReader + ?Sized,
{
    match repo.get_estimate_by_id(estimate_id, user_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::Form("Selected estimate does not exist".to_string())),
    }
}

pub fn add_job<R>(repo: &R, user: &AuthenticatedUser, form: JobForm) -> ServiceResult<Job>
where
    R: JobWriter + EstimateReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let payload = JobPayload::try_from(form)?;
    check_estimate(repo, payload.details.estimate_id, owner.id)?;

    let job = repo.create_job(&payload.into_new(owner.id)).map_err(|err| {
        log::error!("Failed to add a job: {err}");
        err
    })?;

    Ok(job)
}

pub fn update_job<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
    form: JobForm,
) -> ServiceResult<Job>
where
    R: JobWriter + EstimateReader + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let job_id = JobId::new(job_id).map_err(|_| ServiceError::NotFound)?;
    let payload = JobPayload::try_from(form)?;
    check_estimate(repo, payload.details.estimate_id, owner.id)?;

    let job = repo
        .update_job(job_id, owner.id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update job {job_id}: {err}");
            err
        })?;

    Ok(job)
}

pub fn delete_job<R>(repo: &R, user: &AuthenticatedUser, job_id: i32) -> ServiceResult<()>
where
    R: JobWriter + ProfileWriter + ?Sized,
{
    let owner = current_profile(repo, user)?;
    let job_id = JobId::new(job_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_job(job_id, owner.id).map_err(|err| {
        log::error!("Failed to delete job {job_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{estimate, job, member_user, repo_for_profile};

    fn form() -> JobForm {
        JobForm {
            estimate_id: 1,
            job_number: "JOB-002".into(),
            ..JobForm::default()
        }
    }

    #[test]
    fn page_suggests_number_and_lists_estimates() {
        let mut repo = repo_for_profile(7);
        repo.expect_list_jobs()
            .withf(|query| query.status.is_none() && query.user_id.get() == 7)
            .returning(|_| Ok((0, vec![])));
        repo.expect_list_estimates()
            .withf(|query| query.pagination.is_none())
            .returning(|_| Ok((0, vec![])));
        repo.expect_count_jobs().returning(|_| Ok(9));

        let data = load_jobs_page(&repo, &member_user(), IndexQuery::default(), "JOB").unwrap();
        assert_eq!(data.suggested_number, "JOB-010");
        assert_eq!(data.status_filter, None);
    }

    #[test]
    fn job_page_totals_materials() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_job_by_id().returning(|_, _| Ok(Some(job(1))));
        repo.expect_list_estimates().returning(|_| Ok((0, vec![])));
        repo.expect_list_materials_by_job().returning(|_, _| Ok(vec![]));
        repo.expect_list_invoices_by_job().returning(|_, _| Ok(vec![]));

        let data = load_job_page(&repo, &member_user(), 1).unwrap();
        assert_eq!(data.materials_total, rust_decimal::Decimal::ZERO);
    }

    #[test]
    fn job_requires_owned_estimate() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_estimate_by_id().returning(|_, _| Ok(None));
        repo.expect_create_job().times(0);

        let result = add_job(&repo, &member_user(), form());
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn job_is_created_for_owned_estimate() {
        let mut repo = repo_for_profile(7);
        repo.expect_get_estimate_by_id()
            .returning(|_, _| Ok(Some(estimate(1))));
        repo.expect_create_job()
            .withf(|new| new.details.job_number.as_str() == "JOB-002")
            .times(1)
            .returning(|_| Ok(job(2)));

        assert_eq!(add_job(&repo, &member_user(), form()).unwrap().id.get(), 2);
    }
}
