use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, page_error, render_template};
use crate::services::reports as report_service;

#[get("/reports")]
pub async fn show_reports(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match report_service::load_reports(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "reports",
                &server_config.auth_service_url,
            );
            context.insert("summary", &data.summary);
            context.insert("revenue_by_month", &data.revenue_by_month);
            render_template(&tera, "reports/index.html", &context)
        }
        Err(err) => page_error(err, "/"),
    }
}
