use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::EstimateStatus;
use crate::dto::IndexQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::estimates as estimate_service;

#[get("/estimates")]
pub async fn show_estimates(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match estimate_service::load_estimates_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "estimates",
                &server_config.auth_service_url,
            );
            context.insert("estimates", &data.estimates);
            context.insert("status_filter", &data.status_filter);
            context.insert("statuses", &EstimateStatus::options());
            render_template(&tera, "estimates/index.html", &context)
        }
        Err(err) => page_error(err, "/"),
    }
}

/// Registered before `/estimates/{estimate_id}` so `new` is not parsed as an id.
#[get("/estimates/new")]
pub async fn new_estimate(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match estimate_service::load_new_estimate_page(
        repo.get_ref(),
        &user,
        &server_config.estimate_prefix,
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "estimates",
                &server_config.auth_service_url,
            );
            context.insert("suggested_number", &data.suggested_number);
            context.insert("leads", &data.leads);
            context.insert("statuses", &EstimateStatus::options());
            render_template(&tera, "estimates/new.html", &context)
        }
        Err(err) => page_error(err, "/estimates"),
    }
}

#[get("/estimates/{estimate_id}")]
pub async fn show_estimate(
    estimate_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match estimate_service::load_estimate_page(repo.get_ref(), &user, estimate_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "estimates",
                &server_config.auth_service_url,
            );
            context.insert("estimate", &data.estimate);
            context.insert("items", &data.items);
            context.insert("leads", &data.leads);
            context.insert("statuses", &EstimateStatus::options());
            render_template(&tera, "estimates/edit.html", &context)
        }
        Err(err) => page_error(err, "/estimates"),
    }
}

/// Items arrive as repeated keys, so the body is decoded by the service.
#[post("/estimates/add")]
pub async fn add_estimate(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    match estimate_service::add_estimate(repo.get_ref(), &user, &body) {
        Ok(estimate) => {
            FlashMessage::success(format!("Estimate {} created.", estimate.estimate_number))
                .send();
            redirect(&format!("/estimates/{}", estimate.id))
        }
        Err(err) => mutation_error(err, "/estimates/new", "/estimates"),
    }
}

#[post("/estimates/{estimate_id}/update")]
pub async fn update_estimate(
    estimate_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let estimate_id = estimate_id.into_inner();
    let form_url = format!("/estimates/{estimate_id}");

    match estimate_service::update_estimate(repo.get_ref(), &user, estimate_id, &body) {
        Ok(_) => {
            FlashMessage::success("Estimate updated.").send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, "/estimates"),
    }
}

#[post("/estimates/{estimate_id}/delete")]
pub async fn delete_estimate(
    estimate_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match estimate_service::delete_estimate(repo.get_ref(), &user, estimate_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Estimate deleted.").send();
            redirect("/estimates")
        }
        Err(err) => mutation_error(err, "/estimates", "/estimates"),
    }
}
