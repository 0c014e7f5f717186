mod config;
mod error;
mod model;
mod routes;
mod state;

use std::env;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::ServerConfig;
use routes::{configure_routes, cors_policy};
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = ServerConfig::load().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    log::info!("Model path: {}", config.model_path.display());
    log::info!("Favicon path: {}", config.favicon_path.display());
    if config.allowed_origins.is_empty() {
        log::info!("CORS: any origin");
    } else {
        log::info!("CORS origins: {}", config.allowed_origins.join(", "));
    }

    let state = AppState::initialize(&config).map_err(|e| {
        log::error!("Model is required but failed to load: {}", e);
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Model loading failed: {}", e),
        )
    })?;
    let state = web::Data::new(state);

    let bind_address = config.bind_address();
    log::info!("Starting server on http://{}", bind_address);

    let allowed_origins = config.allowed_origins.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors_policy(&allowed_origins))
            .app_data(state.clone())
            .configure(configure_routes)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}
