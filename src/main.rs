use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use stormdesk::config::ApiConfig;
use stormdesk::db::{establish_connection_pool, run_migrations};
use stormdesk::repository::DieselRepository;
use stormdesk::routes;
use stormdesk::services::stocks::MockStockPriceService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ApiConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if config.run_migrations {
        match run_migrations(&pool) {
            Ok(applied) => log::info!("Applied {applied} pending migrations"),
            Err(e) => {
                log::error!("Failed to run migrations: {e}");
                std::process::exit(1);
            }
        }
    }

    let repo = DieselRepository::new(pool);
    let stocks = web::Data::new(MockStockPriceService::new());

    log::info!("API listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(stocks.clone())
            .configure(routes::configure)
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
