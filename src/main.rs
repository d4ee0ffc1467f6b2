mod config;
mod context;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod middlewares;
mod request;
mod response;

use crate::config::Config;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;
use crate::impls::image_store::local_storage::LocalImageStorage;
use crate::middlewares::jwt::JWTMiddleware;
use actix_web::middleware::Logger;
use actix_web::web::{delete, get, post, put, scope, Data};
use actix_web::{App, HttpServer};
use log::info;
use sqlx::postgres::PgPoolOptions;

#[actix_web::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::load()?;
    let pool = PgPoolOptions::new().max_connections(config.max_connections).connect(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;
    let manager = PgSqlxManager::new(pool);
    let images = Data::new(LocalImageStorage::new(&config.url_host, config.static_dir.clone()));
    let secret = config.jwt_secret.clone().into_bytes();
    let shared_config = Data::new(config.clone());
    info!("serving on {}, images under {}", config.bind_addr, config.static_dir.display());
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(Data::new(manager.clone()))
            .app_data(images.clone())
            .app_data(shared_config.clone())
            .service(
                scope("admin/surveys")
                    .wrap(JWTMiddleware::new(secret.clone()))
                    .route("", post().to(handlers::survey::create))
                    .route("", get().to(handlers::survey::list))
                    .route("all", get().to(handlers::survey::list_all))
                    .route("managed", get().to(handlers::survey::managed))
                    .service(
                        scope("{id}")
                            .route("", get().to(handlers::survey::detail))
                            .route("", put().to(handlers::survey::update))
                            .route("", delete().to(handlers::survey::delete))
                            .route("status", put().to(handlers::survey::update_status))
                            .route("managers", post().to(handlers::survey::add_manager))
                            .route("answers", get().to(handlers::survey::answers))
                            .route("answers/all", get().to(handlers::survey::all_answers)),
                    ),
            )
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await?;
    Ok(())
}
