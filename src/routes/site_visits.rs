use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::IndexQuery;
use crate::forms::site_visits::SiteVisitForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::site_visits as site_visit_service;

#[get("/site-visits")]
pub async fn show_site_visits(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match site_visit_service::load_site_visits_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "site_visits",
                &server_config.auth_service_url,
            );
            context.insert("visits", &data.visits);
            context.insert("leads", &data.leads);
            render_template(&tera, "site_visits/index.html", &context)
        }
        Err(err) => page_error(err, "/"),
    }
}

#[get("/site-visits/{visit_id}")]
pub async fn show_site_visit(
    visit_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match site_visit_service::load_site_visit_page(repo.get_ref(), &user, visit_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "site_visits",
                &server_config.auth_service_url,
            );
            context.insert("visit_date", &data.visit.date_input());
            context.insert("visit_time", &data.visit.time_input());
            context.insert("visit", &data.visit);
            context.insert("leads", &data.leads);
            render_template(&tera, "site_visits/edit.html", &context)
        }
        Err(err) => page_error(err, "/site-visits"),
    }
}

#[post("/site-visits/add")]
pub async fn add_site_visit(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SiteVisitForm>,
) -> impl Responder {
    match site_visit_service::add_site_visit(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Site visit scheduled.").send();
            redirect("/site-visits")
        }
        Err(err) => mutation_error(err, "/site-visits", "/site-visits"),
    }
}

#[post("/site-visits/{visit_id}/update")]
pub async fn update_site_visit(
    visit_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SiteVisitForm>,
) -> impl Responder {
    let visit_id = visit_id.into_inner();
    let form_url = format!("/site-visits/{visit_id}");

    match site_visit_service::update_site_visit(repo.get_ref(), &user, visit_id, form) {
        Ok(_) => {
            FlashMessage::success("Site visit updated.").send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, "/site-visits"),
    }
}

#[post("/site-visits/{visit_id}/delete")]
pub async fn delete_site_visit(
    visit_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match site_visit_service::delete_site_visit(repo.get_ref(), &user, visit_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Site visit deleted.").send();
            redirect("/site-visits")
        }
        Err(err) => mutation_error(err, "/site-visits", "/site-visits"),
    }
}
