use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::ProfileRole;
use crate::forms::settings::RoleForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::admin as admin_service;

#[get("/admin/profiles")]
pub async fn show_profiles(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_admin_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "admin",
                &server_config.auth_service_url,
            );
            context.insert("profiles", &data.profiles);
            context.insert("roles", &ProfileRole::options());
            render_template(&tera, "admin/profiles.html", &context)
        }
        Err(err) => page_error(err, "/"),
    }
}

#[post("/admin/profiles/{profile_id}/role")]
pub async fn update_profile_role(
    profile_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RoleForm>,
) -> impl Responder {
    match admin_service::update_profile_role(repo.get_ref(), &user, profile_id.into_inner(), form)
    {
        Ok(profile) => {
            FlashMessage::success(format!("Role of {} updated.", profile.email)).send();
            redirect("/admin/profiles")
        }
        Err(err) => mutation_error(err, "/admin/profiles", "/admin/profiles"),
    }
}
