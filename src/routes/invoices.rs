use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::{InvoiceStatus, PaymentMethod};
use crate::dto::IndexQuery;
use crate::forms::invoices::InvoiceForm;
use crate::forms::payments::PaymentForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::invoices as invoice_service;
use crate::services::payments as payment_service;

#[get("/invoices")]
pub async fn show_invoices(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match invoice_service::load_invoices_page(
        repo.get_ref(),
        &user,
        params.into_inner(),
        &server_config.invoice_prefix,
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "invoices",
                &server_config.auth_service_url,
            );
            context.insert("invoices", &data.invoices);
            context.insert("status_filter", &data.status_filter);
            context.insert("jobs", &data.jobs);
            context.insert("suggested_number", &data.suggested_number);
            context.insert("statuses", &InvoiceStatus::options());
            render_template(&tera, "invoices/index.html", &context)
        }
        Err(err) => page_error(err, "/"),
    }
}

#[get("/invoices/{invoice_id}")]
pub async fn show_invoice(
    invoice_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match invoice_service::load_invoice_page(repo.get_ref(), &user, invoice_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "invoices",
                &server_config.auth_service_url,
            );
            context.insert("remaining", &data.invoice.remaining());
            context.insert("invoice", &data.invoice);
            context.insert("jobs", &data.jobs);
            context.insert("payments", &data.payments);
            context.insert("totals", &data.totals);
            context.insert("statuses", &InvoiceStatus::options());
            context.insert("payment_methods", &PaymentMethod::options());
            render_template(&tera, "invoices/edit.html", &context)
        }
        Err(err) => page_error(err, "/invoices"),
    }
}

#[post("/invoices/add")]
pub async fn add_invoice(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<InvoiceForm>,
) -> impl Responder {
    match invoice_service::add_invoice(repo.get_ref(), &user, form) {
        Ok(invoice) => {
            FlashMessage::success(format!("Invoice {} created.", invoice.invoice_number)).send();
            redirect(&format!("/invoices/{}", invoice.id))
        }
        Err(err) => mutation_error(err, "/invoices", "/invoices"),
    }
}

#[post("/invoices/{invoice_id}/update")]
pub async fn update_invoice(
    invoice_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<InvoiceForm>,
) -> impl Responder {
    let invoice_id = invoice_id.into_inner();
    let form_url = format!("/invoices/{invoice_id}");

    match invoice_service::update_invoice(repo.get_ref(), &user, invoice_id, form) {
        Ok(_) => {
            FlashMessage::success("Invoice updated.").send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, "/invoices"),
    }
}

#[post("/invoices/{invoice_id}/delete")]
pub async fn delete_invoice(
    invoice_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match invoice_service::delete_invoice(repo.get_ref(), &user, invoice_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Invoice deleted.").send();
            redirect("/invoices")
        }
        Err(err) => mutation_error(err, "/invoices", "/invoices"),
    }
}

#[post("/invoices/{invoice_id}/payments/add")]
pub async fn add_payment(
    invoice_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<PaymentForm>,
) -> impl Responder {
    let invoice_id = invoice_id.into_inner();
    let form_url = format!("/invoices/{invoice_id}");

    match payment_service::add_payment(repo.get_ref(), &user, invoice_id, form) {
        Ok(payment) => {
            FlashMessage::success(format!("Payment of {} recorded.", payment.amount)).send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, "/invoices"),
    }
}

#[post("/invoices/{invoice_id}/payments/{payment_id}/delete")]
pub async fn delete_payment(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (invoice_id, payment_id) = path.into_inner();
    let form_url = format!("/invoices/{invoice_id}");

    match payment_service::delete_payment(repo.get_ref(), &user, invoice_id, payment_id) {
        Ok(()) => {
            FlashMessage::success("Payment deleted.").send();
            redirect(&form_url)
        }
        Err(err) => mutation_error(err, &form_url, &form_url),
    }
}
