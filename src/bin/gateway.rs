use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use stormdesk::gateway::{GatewayConfig, RouteTable, proxy};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let config = match GatewayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let table = match RouteTable::from_config(&config) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Invalid route table: {e}");
            std::process::exit(1);
        }
    };
    if table.is_empty() {
        log::warn!("No routes configured; every proxied request will get 404");
    }

    let client = match reqwest::Client::builder().build() {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let table = web::Data::new(table);
    let client = web::Data::new(client);

    log::info!("Gateway listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(table.clone())
            .app_data(client.clone())
            .app_data(web::PayloadConfig::new(10 * 1024 * 1024))
            .configure(proxy::configure)
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
