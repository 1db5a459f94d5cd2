use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, page_error, render_template};
use crate::services::dashboard as dashboard_service;

#[get("/")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match dashboard_service::load_dashboard(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("stats", &data.stats);
            context.insert("revenue_by_month", &data.revenue_by_month);
            context.insert("job_statuses", &data.job_statuses);
            context.insert("recent_activity", &data.recent_activity);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => page_error(err, "/na"),
    }
}
