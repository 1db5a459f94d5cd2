use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::IndexQuery;
use crate::forms::customers::{CustomerForm, UploadCustomersForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::customers as customer_service;

#[get("/customers")]
pub async fn show_customers(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match customer_service::load_customers_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "customers",
                &server_config.auth_service_url,
            );
            context.insert("customers", &data.customers);
            if let Some(search_query) = data.search_query {
                context.insert("search_query", &search_query);
            }
            render_template(&tera, "customers/index.html", &context)
        }
        Err(err) => page_error(err, "/"),
    }
}

#[get("/customers/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match customer_service::load_customer_page(repo.get_ref(), &user, customer_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "customers",
                &server_config.auth_service_url,
            );
            context.insert("customer", &data.customer);
            context.insert("leads", &data.leads);
            render_template(&tera, "customers/edit.html", &context)
        }
        Err(err) => page_error(err, "/customers"),
    }
}

#[post("/customers/add")]
pub async fn add_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CustomerForm>,
) -> impl Responder {
    match customer_service::add_customer(repo.get_ref(), &user, form) {
        Ok(customer) => {
            FlashMessage::success(format!("Customer {} added.", customer.name)).send();
            redirect("/customers")
        }
        Err(err) => mutation_error(err, "/customers", "/customers"),
    }
}

#[post("/customers/{customer_id}/update")]
pub async fn update_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CustomerForm>,
) -> impl Responder {
    let customer_id = customer_id.into_inner();
    let form_url = format!("/customers/{customer_id}");

    match customer_service::update_customer(repo.get_ref(), &user, customer_id, form) {
        Ok(_) => {
            FlashMessage::success("Customer updated.").send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, "/customers"),
    }
}

#[post("/customers/{customer_id}/delete")]
pub async fn delete_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match customer_service::delete_customer(repo.get_ref(), &user, customer_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Customer deleted.").send();
            redirect("/customers")
        }
        Err(err) => mutation_error(err, "/customers", "/customers"),
    }
}

#[post("/customers/upload")]
pub async fn upload_customers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadCustomersForm>,
) -> impl Responder {
    match customer_service::upload_customers(repo.get_ref(), &user, &mut form) {
        Ok(count) => {
            FlashMessage::success(format!("Imported {count} customers.")).send();
            redirect("/customers")
        }
        Err(err) => mutation_error(err, "/customers", "/customers"),
    }
}
