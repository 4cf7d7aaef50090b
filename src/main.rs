use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use catalog_web::db::establish_connection_pool;
use catalog_web::models::config::AppConfig;
use catalog_web::repository::DieselRepository;
use catalog_web::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    if config.secret_key.len() < 32 {
        return Err(std::io::Error::other(
            "secret_key must be at least 32 characters long",
        ));
    }

    let pool = establish_connection_pool(&config.database_url)
        .map_err(|e| std::io::Error::other(format!("Failed to establish SQLite connection: {e}")))?;
    let repo = DieselRepository::new(pool);

    let tera = Tera::new("templates/**/*.html")
        .map_err(|e| std::io::Error::other(format!("Failed to load templates: {e}")))?;

    let secret_key = Key::derive_from(config.secret_key.as_bytes());
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    log::info!(
        "Starting server at http://{}:{}",
        config.bind_address,
        config.port
    );

    let bind_address = (config.bind_address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(message_framework.clone())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .service(routes::main::index)
            .service(routes::main::show_categories)
            .service(routes::main::show_contact)
            .service(routes::main::send_contact)
            .service(routes::products::show_products)
            // Literal segments before the `{product_id}`/`{slug}` matchers.
            .service(routes::products::add_product_page)
            .service(routes::products::add_product)
            .service(routes::products::show_product)
            .service(routes::products::edit_product_page)
            .service(routes::products::edit_product)
            .service(routes::products::delete_product_page)
            .service(routes::products::delete_product)
            .service(routes::blogs::show_blogs)
            .service(routes::blogs::add_blog_page)
            .service(routes::blogs::add_blog)
            .service(routes::blogs::show_blog)
            .service(routes::blogs::edit_blog_page)
            .service(routes::blogs::edit_blog)
            .service(routes::blogs::delete_blog_page)
            .service(routes::blogs::delete_blog)
            .service(Files::new("/assets", "./assets"))
    })
    .bind(bind_address)?
    .run()
    .await
}
