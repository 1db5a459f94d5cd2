use actix_web::http::{StatusCode, header};
use actix_web_flash_messages::Level;
use renovation_crm::routes::{alert_level_to_str, redirect, render_template};
use tera::{Context, Tera};

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[test]
fn test_redirect_uses_see_other() {
    let resp = redirect("/customers");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/customers");
}

#[test]
fn test_render_template_reports_missing_template() {
    let tera = Tera::default();
    let resp = render_template(&tera, "missing.html", &Context::new());
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_render_template_renders_html() {
    let mut tera = Tera::default();
    tera.add_raw_template("hello.html", "Hello {{ name }}")
        .unwrap();
    let mut context = Context::new();
    context.insert("name", "crew");

    let resp = render_template(&tera, "hello.html", &context);
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
}

#[test]
fn test_all_templates_parse() {
    let tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"));
    assert!(tera.is_ok(), "{:?}", tera.err());
}
