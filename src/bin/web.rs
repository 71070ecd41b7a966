use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use stormdesk::config::WebConfig;
use stormdesk::web::{ApiClient, routes};

/// Minimum key length accepted by `Key::from`.
const MIN_SECRET_LEN: usize = 64;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = WebConfig::from_env();

    let secret_key = match config.secret_key.as_deref() {
        Some(key) if key.len() >= MIN_SECRET_LEN => Key::from(key.as_bytes()),
        Some(_) => {
            log::warn!("SECRET_KEY shorter than {MIN_SECRET_LEN} bytes, using a random key");
            Key::generate()
        }
        None => Key::generate(),
    };

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let api = ApiClient::new(config.gateway_url.clone());
    log::info!(
        "Web front end listening on {}:{} using gateway {}",
        config.address,
        config.port,
        api.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(routes::configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(api.clone()))
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
