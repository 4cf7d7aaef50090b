use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::contact::{ContactForm, ContactFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{alert_level_to_str, base_context, render_template};
use crate::services::main::{show_index as show_index_service, submit_contact};

#[get("/")]
pub async fn index(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_index_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "index");
            context.insert("categories", &categories);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render index page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/categories")]
pub async fn show_categories(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_index_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("categories", &categories);
            render_template(&tera, "categories/list.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render categories page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/contact")]
pub async fn show_contact(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "contact");
    render_template(&tera, "main/contact.html", &context)
}

/// The contact page re-renders in place instead of redirecting, so the
/// acknowledgement is appended to the context directly rather than going
/// through the flash cookie.
#[post("/contact")]
pub async fn send_contact(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    let mut alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    match ContactFormPayload::try_from(form) {
        Ok(payload) => match submit_contact(payload) {
            Ok(()) => alerts.push(("Сообщение отправлено.".to_string(), "success")),
            Err(err) => {
                log::error!("Failed to process contact message: {err}");
                alerts.push(("Не удалось отправить сообщение.".to_string(), "danger"));
            }
        },
        Err(e) => alerts.push((e.to_string(), "danger")),
    }

    let mut context = base_context(&flash_messages, "contact");
    context.insert("alerts", &alerts);
    render_template(&tera, "main/contact.html", &context)
}
