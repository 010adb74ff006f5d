use actix_web::{middleware, web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use furrycare_service::{
    api::{handlers::health_handlers::not_found, state::AppState},
    infrastructure::{mongo_context::MongoContext, mongodb::MongoReminderRepository},
    routes::configure,
    utils::{config::AppConfig, errors::expose_internal_details},
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    expose_internal_details(!config.production);

    let mongo_context = match MongoContext::init(&config.database_url, &config.database_name, &config.service_name).await {
        Ok(context) => context,
        Err(e) => {
            log::error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = MongoReminderRepository::new(&mongo_context).ensure_indexes().await {
        log::error!("Failed to create reminder indexes: {}", e);
        std::process::exit(1);
    }

    let app_state = AppState::mongo(&mongo_context, config.service_name.clone());
    let (host, port) = config.bind_address();

    log::info!("{} listening on http://{}:{}", config.service_name, host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(app_state.clone()))
            .configure(configure)
            .default_service(web::to(not_found))
    })
    .bind((host, port))?
    .run()
    .await
}
