mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    // RUST_LOG prioritaire, "info" sinon
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    tracing::info!("Connecting to database...");
    let db = db::establish_connection(&config).await.map_err(|e| {
        tracing::error!(error = %e, "failed to connect to database");
        io::Error::other(e.to_string())
    })?;
    tracing::info!("Database connected");

    let bind = (config.host, config.port);
    tracing::info!("Starting server on http://{}:{}", config.host, config.port);

    let db = web::Data::new(db);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(db.clone())
            .app_data(config.clone())
            .configure(routes::configure_routes)
    })
        .bind(bind)?
        .run()
        .await
}
