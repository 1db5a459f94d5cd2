//! HTTP handlers and the helpers they share.

use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, http::header, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;

pub mod admin;
pub mod api;
pub mod customers;
pub mod dashboard;
pub mod estimates;
pub mod invoices;
pub mod jobs;
pub mod leads;
pub mod reports;
pub mod settings;
pub mod site_visits;

/// Maps a flash message level to the bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: alerts, the current user and navigation.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Response for a page that failed to load.
pub fn page_error(err: ServiceError, list_url: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("You do not have access to this page.").send();
            redirect("/na")
        }
        ServiceError::NotFound => {
            FlashMessage::error("Record not found.").send();
            redirect(list_url)
        }
        err => {
            log::error!("Failed to load page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flashes the outcome of a failed form submission and redirects.
///
/// Validation problems go back to the form, missing records to the list.
pub fn mutation_error(err: ServiceError, form_url: &str, list_url: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("You do not have access to this action.").send();
            redirect("/na")
        }
        ServiceError::NotFound => {
            FlashMessage::error("Record not found.").send();
            redirect(list_url)
        }
        ServiceError::Form(message) => {
            FlashMessage::error(message).send();
            redirect(form_url)
        }
        ServiceError::TypeConstraint(err) => {
            FlashMessage::error(err.to_string()).send();
            redirect(form_url)
        }
        ServiceError::Conflict(_) => {
            FlashMessage::error("A record with this number already exists.").send();
            redirect(form_url)
        }
        err => {
            log::error!("Failed to save changes: {err}");
            FlashMessage::error("Something went wrong, please try again.").send();
            redirect(form_url)
        }
    }
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );

    render_template(&tera, "main/not_assigned.html", &context)
}
