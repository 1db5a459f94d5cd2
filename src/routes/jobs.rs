use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::JobStatus;
use crate::dto::IndexQuery;
use crate::forms::jobs::JobForm;
use crate::forms::materials::MaterialForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::jobs as job_service;
use crate::services::materials as material_service;

#[get("/jobs")]
pub async fn show_jobs(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match job_service::load_jobs_page(
        repo.get_ref(),
        &user,
        params.into_inner(),
        &server_config.job_prefix,
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "jobs",
                &server_config.auth_service_url,
            );
            context.insert("jobs", &data.jobs);
            context.insert("status_filter", &data.status_filter);
            context.insert("estimates", &data.estimates);
            context.insert("suggested_number", &data.suggested_number);
            context.insert("statuses", &JobStatus::options());
            render_template(&tera, "jobs/index.html", &context)
        }
        Err(err) => page_error(err, "/"),
    }
}

#[get("/jobs/{job_id}")]
pub async fn show_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match job_service::load_job_page(repo.get_ref(), &user, job_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "jobs",
                &server_config.auth_service_url,
            );
            context.insert("job", &data.job);
            context.insert("estimates", &data.estimates);
            context.insert("materials", &data.materials);
            context.insert("materials_total", &data.materials_total);
            context.insert("invoices", &data.invoices);
            context.insert("statuses", &JobStatus::options());
            render_template(&tera, "jobs/edit.html", &context)
        }
        Err(err) => page_error(err, "/jobs"),
    }
}

#[post("/jobs/add")]
pub async fn add_job(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<JobForm>,
) -> impl Responder {
    match job_service::add_job(repo.get_ref(), &user, form) {
        Ok(job) => {
            FlashMessage::success(format!("Job {} created.", job.job_number)).send();
            redirect(&format!("/jobs/{}", job.id))
        }
        Err(err) => mutation_error(err, "/jobs", "/jobs"),
    }
}

#[post("/jobs/{job_id}/update")]
pub async fn update_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<JobForm>,
) -> impl Responder {
    let job_id = job_id.into_inner();
    let form_url = format!("/jobs/{job_id}");

    match job_service::update_job(repo.get_ref(), &user, job_id, form) {
        Ok(_) => {
            FlashMessage::success("Job updated.").send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, "/jobs"),
    }
}

#[post("/jobs/{job_id}/delete")]
pub async fn delete_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match job_service::delete_job(repo.get_ref(), &user, job_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Job deleted.").send();
            redirect("/jobs")
        }
        Err(err) => mutation_error(err, "/jobs", "/jobs"),
    }
}

#[post("/jobs/{job_id}/materials/add")]
pub async fn add_material(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<MaterialForm>,
) -> impl Responder {
    let job_id = job_id.into_inner();
    let form_url = format!("/jobs/{job_id}");

    match material_service::add_material(repo.get_ref(), &user, job_id, form) {
        Ok(material) => {
            FlashMessage::success(format!("Added {}.", material.name)).send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, "/jobs"),
    }
}

#[post("/jobs/{job_id}/materials/{material_id}/delete")]
pub async fn delete_material(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (job_id, material_id) = path.into_inner();
    let form_url = format!("/jobs/{job_id}");

    match material_service::delete_material(repo.get_ref(), &user, job_id, material_id) {
        Ok(()) => {
            FlashMessage::success("Material removed.").send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, &form_url),
    }
}
