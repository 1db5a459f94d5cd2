use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::LeadStatus;
use crate::dto::IndexQuery;
use crate::forms::leads::LeadForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::leads as lead_service;

#[get("/leads")]
pub async fn show_leads(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match lead_service::load_leads_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "leads",
                &server_config.auth_service_url,
            );
            context.insert("leads", &data.leads);
            context.insert("status_filter", &data.status_filter);
            context.insert("customers", &data.customers);
            context.insert("statuses", &LeadStatus::options());
            render_template(&tera, "leads/index.html", &context)
        }
        Err(err) => page_error(err, "/"),
    }
}

#[get("/leads/{lead_id}")]
pub async fn show_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match lead_service::load_lead_page(repo.get_ref(), &user, lead_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "leads",
                &server_config.auth_service_url,
            );
            context.insert("lead", &data.lead);
            context.insert("customers", &data.customers);
            context.insert("site_visits", &data.site_visits);
            context.insert("estimates", &data.estimates);
            context.insert("statuses", &LeadStatus::options());
            render_template(&tera, "leads/edit.html", &context)
        }
        Err(err) => page_error(err, "/leads"),
    }
}

#[post("/leads/add")]
pub async fn add_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LeadForm>,
) -> impl Responder {
    match lead_service::add_lead(repo.get_ref(), &user, form) {
        Ok(lead) => {
            FlashMessage::success("Lead added.").send();
            redirect(&format!("/leads/{}", lead.id))
        }
        Err(err) => mutation_error(err, "/leads", "/leads"),
    }
}

#[post("/leads/{lead_id}/update")]
pub async fn update_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LeadForm>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    let form_url = format!("/leads/{lead_id}");

    match lead_service::update_lead(repo.get_ref(), &user, lead_id, form) {
        Ok(_) => {
            FlashMessage::success("Lead updated.").send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, "/leads"),
    }
}

#[post("/leads/{lead_id}/delete")]
pub async fn delete_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match lead_service::delete_lead(repo.get_ref(), &user, lead_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Lead deleted.").send();
            redirect("/leads")
        }
        Err(err) => mutation_error(err, "/leads", "/leads"),
    }
}
