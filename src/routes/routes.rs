use std::path::Path;
use actix_files::Files;
use actix_web::web;
use crate::errors::ApiError;

use super::status::status_handlers;

pub fn status_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status_handlers::root))
        .route("/health", web::get().to(status_handlers::health))
        .route("/docs", web::get().to(status_handlers::docs));
}

use super::auth::auth_handlers;

pub fn auth_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(auth_handlers::register))
            .route("/login", web::post().to(auth_handlers::login))
    );
}

use super::users::users_handlers;

pub fn users_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .route("/me", web::get().to(users_handlers::get_me))
            .route("/me", web::put().to(users_handlers::update_me))
            .route("/me", web::delete().to(users_handlers::delete_me))
    );
}

use super::projects::projects_handlers;

pub fn projects_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/projects")
            .route("", web::get().to(projects_handlers::list_projects))
            .route("", web::post().to(projects_handlers::create_project))
            .route("/{id}", web::get().to(projects_handlers::get_project))
            .route("/{id}", web::put().to(projects_handlers::update_project))
            .route("/{id}", web::delete().to(projects_handlers::delete_project))
            .route("/{id}/tasks", web::get().to(projects_handlers::list_project_tasks))
            .route("/{id}/tasks", web::post().to(projects_handlers::create_project_task))
    );
}

use super::tasks::tasks_handlers;

pub fn tasks_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tasks")
            .route("/{id}", web::get().to(tasks_handlers::get_task))
            .route("/{id}", web::put().to(tasks_handlers::update_task))
            .route("/{id}", web::delete().to(tasks_handlers::delete_task))
    );
}

/// Every JSON endpoint, with extractor errors reported in the same body shape as handler errors.
pub fn api_configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        ApiError::bad_request(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        ApiError::bad_request(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _| {
        ApiError::bad_request(err.to_string()).into()
    }))
    .configure(status_configure)
    .configure(auth_configure)
    .configure(users_configure)
    .configure(projects_configure)
    .configure(tasks_configure);
}

/// Serves `static_dir` under `/static` when it exists; otherwise registers nothing.
pub fn static_configure(static_dir: &Path) -> impl FnOnce(&mut web::ServiceConfig) {
    let static_dir = static_dir.to_path_buf();
    move |cfg| {
        if static_dir.is_dir() {
            cfg.service(Files::new("/static", static_dir));
        }
    }
}
