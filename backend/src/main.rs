use actix_web::{web, App, HttpServer};
use backend::config::AppConfig;
use backend::db::Database;
use backend::services;
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    config.ensure_directories()?;

    let database = Database::new(&config.database_path);
    database.ensure_schema().map_err(io::Error::other)?;
    info!("Database ready at {}", config.database_path);

    let url = format!("http://{}:{}", config.host, config.port);
    let bind_addr = (config.host.clone(), config.port);
    info!("Server running at {}", url);

    let database = web::Data::new(database);
    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(database.clone())
            .app_data(config.clone())
            .service(services::posts::configure_routes())
    })
    .bind(bind_addr)?
    .run()
    .await
}
