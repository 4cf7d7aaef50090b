use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::blog::Blog;
use crate::forms::blogs::{BlogForm, BlogFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::blogs::{
    create_blog as create_blog_service, delete_blog as delete_blog_service,
    edit_blog_page as edit_blog_page_service, show_blog as show_blog_service,
    show_blogs as show_blogs_service, update_blog as update_blog_service,
};

#[get("/blogs")]
pub async fn show_blogs(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_blogs_service(repo.get_ref()) {
        Ok(blogs) => {
            let mut context = base_context(&flash_messages, "blogs");
            context.insert("blogs", &blogs);
            render_template(&tera, "blogs/list.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render blogs page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blogs/add")]
pub async fn add_blog_page(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "blogs");
    context.insert("blog", &None::<Blog>);
    context.insert("action", "/blogs/add");
    render_template(&tera, "blogs/form.html", &context)
}

#[post("/blogs/add")]
pub async fn add_blog(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BlogForm>,
) -> impl Responder {
    let payload: BlogFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/blogs/add");
        }
    };

    match create_blog_service(payload, repo.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Запись добавлена.").send();
            redirect("/blogs")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/blogs/add")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to add blog: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blogs/{slug}")]
pub async fn show_blog(
    slug: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_blog_service(&slug, repo.get_ref()) {
        Ok(blog) => {
            let mut context = base_context(&flash_messages, "blogs");
            context.insert("blog", &blog);
            render_template(&tera, "blogs/detail.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render blog page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blogs/{slug}/edit")]
pub async fn edit_blog_page(
    slug: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let slug = slug.into_inner();
    match edit_blog_page_service(&slug, repo.get_ref()) {
        Ok(blog) => {
            let mut context = base_context(&flash_messages, "blogs");
            context.insert("blog", &blog);
            context.insert("action", &format!("/blogs/{slug}/edit"));
            render_template(&tera, "blogs/form.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render blog form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/blogs/{slug}/edit")]
pub async fn edit_blog(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BlogForm>,
) -> impl Responder {
    let slug = slug.into_inner();
    let payload: BlogFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("/blogs/{slug}/edit"));
        }
    };

    match update_blog_service(&slug, payload, repo.get_ref()) {
        Ok(new_slug) => {
            FlashMessage::success("Запись обновлена.").send();
            // The slug may have just changed; redirect to the current one.
            redirect(&format!("/blogs/{new_slug}"))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/blogs/{slug}/edit"))
        }
        Err(err) => {
            log::error!("Failed to update blog: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blogs/{slug}/delete")]
pub async fn delete_blog_page(
    slug: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    // Fetch without recording a view: only detail reads count.
    match edit_blog_page_service(&slug, repo.get_ref()) {
        Ok(blog) => {
            let mut context = base_context(&flash_messages, "blogs");
            context.insert("blog", &blog);
            render_template(&tera, "blogs/confirm_delete.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render delete confirmation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/blogs/{slug}/delete")]
pub async fn delete_blog(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_blog_service(&slug, repo.get_ref()) {
        Ok(()) => FlashMessage::success("Запись удалена.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Запись не найдена.").send(),
        Err(err) => {
            log::error!("Failed to delete blog: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/blogs")
}
