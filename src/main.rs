mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod state;
mod utils;
#[cfg(test)]
mod test_support;

use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use config::Config;
use db::postgres::PgStore;
use state::AppState;
use utils::jwt::JwtKeys;
use utils::s3::{create_s3_client, S3PhotoStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    // Initialize the database pool
    let pool = db::create_pool(&config)
        .await
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    db::init_schema(&pool)
        .await
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let s3_client = create_s3_client(&config).await;
    let store = Arc::new(PgStore::new(pool));
    let state = web::Data::new(AppState {
        credentials: store.clone(),
        employees: store,
        photos: Arc::new(S3PhotoStore::new(s3_client, config.s3_bucket.clone())),
        jwt: JwtKeys::new(&config.jwt_secret),
    });
    let body_limit = config.body_limit_bytes;

    info!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(handlers::json_config(body_limit))
            .configure(handlers::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await
}
