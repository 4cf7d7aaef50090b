use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::domain::version::Version;
use crate::forms::products::ProductSubmission;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::products::{
    ProductSaveOutcome, SaveProductTarget, delete_product as delete_product_service,
    edit_product_page as edit_product_page_service, new_product_page as new_product_page_service,
    save_product as save_product_service, show_product as show_product_service,
    show_products as show_products_service,
};

#[get("/products")]
pub async fn show_products(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_products_service(repo.get_ref()) {
        Ok(products) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("products", &products);
            render_template(&tera, "products/list.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render products page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/add")]
pub async fn add_product_page(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match new_product_page_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("categories", &categories);
            context.insert("product", &None::<Product>);
            // One blank version slot on create.
            context.insert("versions", &Vec::<Version>::new());
            context.insert("extra", &true);
            context.insert("action", "/products/add");
            render_template(&tera, "products/form.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/add")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let submission = ProductSubmission::parse(form);

    match save_product_service(SaveProductTarget::Create, submission, repo.get_ref()) {
        Ok(ProductSaveOutcome::Saved { .. }) => {
            FlashMessage::success("Товар добавлен.").send();
            redirect("/products")
        }
        Ok(ProductSaveOutcome::VersionsRejected { reason, .. }) => {
            FlashMessage::warning(format!(
                "Товар добавлен, но версии отклонены: {reason}"
            ))
            .send();
            redirect("/products")
        }
        Ok(ProductSaveOutcome::Rejected { reason }) => {
            FlashMessage::error(reason).send();
            redirect("/products/add")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/products/add")
        }
        Err(err) => {
            log::error!("Failed to add product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_product_service(product_id.into_inner(), repo.get_ref()) {
        Ok((product, category, versions)) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("product", &product);
            context.insert("category", &category);
            context.insert("versions", &versions);
            render_template(&tera, "products/detail.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render product page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}/edit")]
pub async fn edit_product_page(
    product_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    match edit_product_page_service(product_id, repo.get_ref()) {
        Ok((product, versions, categories)) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("categories", &categories);
            context.insert("product", &product);
            // Exactly the existing versions, no blank slot, on update.
            context.insert("versions", &versions);
            context.insert("extra", &false);
            context.insert("action", &format!("/products/{product_id}/edit"));
            render_template(&tera, "products/form.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/edit")]
pub async fn edit_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let target = match ProductId::new(product_id) {
        Ok(id) => SaveProductTarget::Update(id),
        Err(_) => return HttpResponse::NotFound().finish(),
    };
    let submission = ProductSubmission::parse(form);

    match save_product_service(target, submission, repo.get_ref()) {
        Ok(ProductSaveOutcome::Saved { .. }) => {
            FlashMessage::success("Товар обновлён.").send();
            redirect("/products")
        }
        Ok(ProductSaveOutcome::VersionsRejected { reason, .. }) => {
            FlashMessage::warning(format!(
                "Товар обновлён, но версии отклонены: {reason}"
            ))
            .send();
            redirect("/products")
        }
        Ok(ProductSaveOutcome::Rejected { reason }) => {
            FlashMessage::error(reason).send();
            redirect(&format!("/products/{product_id}/edit"))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/products/{product_id}/edit"))
        }
        Err(err) => {
            log::error!("Failed to update product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}/delete")]
pub async fn delete_product_page(
    product_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_product_service(product_id.into_inner(), repo.get_ref()) {
        Ok((product, _category, _versions)) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("product", &product);
            render_template(&tera, "products/confirm_delete.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render delete confirmation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_product_service(product_id.into_inner(), repo.get_ref()) {
        Ok(()) => FlashMessage::success("Товар удалён.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Товар не найден.").send(),
        Err(err) => {
            log::error!("Failed to delete product: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/products")
}
