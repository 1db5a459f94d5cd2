#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::middleware::{Compress, Logger};
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::{
    admin, api, customers, dashboard, estimates, invoices, jobs, leads, logout, not_assigned,
    reports, settings, site_visits,
};

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "renovation";
pub const SERVICE_ADMIN_ROLE: &str = "renovation_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Secret is too short for cookie keys: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    let signin_url = server_config.signin_url();

    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(web::scope("/api").service(api::api_v1_customers))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized::new(signin_url.clone()))
                    .service(dashboard::show_dashboard)
                    .service(customers::show_customers)
                    .service(customers::add_customer)
                    .service(customers::upload_customers)
                    .service(customers::show_customer)
                    .service(customers::update_customer)
                    .service(customers::delete_customer)
                    .service(leads::show_leads)
                    .service(leads::add_lead)
                    .service(leads::show_lead)
                    .service(leads::update_lead)
                    .service(leads::delete_lead)
                    .service(site_visits::show_site_visits)
                    .service(site_visits::add_site_visit)
                    .service(site_visits::show_site_visit)
                    .service(site_visits::update_site_visit)
                    .service(site_visits::delete_site_visit)
                    .service(estimates::show_estimates)
                    .service(estimates::new_estimate)
                    .service(estimates::add_estimate)
                    .service(estimates::show_estimate)
                    .service(estimates::update_estimate)
                    .service(estimates::delete_estimate)
                    .service(jobs::show_jobs)
                    .service(jobs::add_job)
                    .service(jobs::show_job)
                    .service(jobs::update_job)
                    .service(jobs::delete_job)
                    .service(jobs::add_material)
                    .service(jobs::delete_material)
                    .service(invoices::show_invoices)
                    .service(invoices::add_invoice)
                    .service(invoices::show_invoice)
                    .service(invoices::update_invoice)
                    .service(invoices::delete_invoice)
                    .service(invoices::add_payment)
                    .service(invoices::delete_payment)
                    .service(reports::show_reports)
                    .service(settings::show_settings)
                    .service(settings::update_settings)
                    .service(admin::show_profiles)
                    .service(admin::update_profile_role)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
