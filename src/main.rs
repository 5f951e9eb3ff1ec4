use std::io;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use task_manager_backend::config::Config;
use task_manager_backend::database::{create_pool, create_tables};
use task_manager_backend::middleware::build_cors;
use task_manager_backend::routes::routes;
use task_manager_backend::routes::status::status_models::{APP_TITLE, APP_VERSION};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(io::Error::other)?;
    info!("Starting {} v{}", APP_TITLE, APP_VERSION);

    // Connectivity or schema errors abort startup
    let pool = create_pool(&config).await.map_err(io::Error::other)?;
    create_tables(&pool).await.map_err(io::Error::other)?;

    if config.static_dir.is_dir() {
        info!("Serving static files from {}", config.static_dir.display());
    } else {
        warn!("Static directory {} not found, /static is disabled", config.static_dir.display());
    }

    let server_address = config.server_address.clone();
    let pool = web::Data::new(pool);
    let config = web::Data::new(config);
    info!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(build_cors(&config.cors_origins))
            .app_data(pool.clone())
            .app_data(config.clone())
            .configure(routes::api_configure)
            .configure(routes::static_configure(&config.static_dir))
    })
    .bind(&server_address)?
    .run()
    .await
}
