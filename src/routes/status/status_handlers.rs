use actix_web::{HttpResponse, Responder};
use super::status_models::{
    DocsResponse, Endpoint, HealthResponse, RootResponse,
    APP_DESCRIPTION, APP_TITLE, APP_VERSION,
};

pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(RootResponse {
        message: format!("Welcome to {}", APP_TITLE),
        status: "running",
        docs: "/docs",
    })
}

// Liveness only, never touches the database
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "healthy" })
}

const ENDPOINTS: &[(&str, &str, bool, &str)] = &[
    ("GET", "/", false, "Service banner"),
    ("GET", "/health", false, "Liveness check"),
    ("GET", "/docs", false, "This document"),
    ("POST", "/api/auth/register", false, "Create a user account"),
    ("POST", "/api/auth/login", false, "Exchange credentials for a bearer token"),
    ("GET", "/api/users/me", true, "Current user"),
    ("PUT", "/api/users/me", true, "Update email or password"),
    ("DELETE", "/api/users/me", true, "Delete the account with its projects and tasks"),
    ("GET", "/api/projects", true, "List own projects"),
    ("POST", "/api/projects", true, "Create a project"),
    ("GET", "/api/projects/{id}", true, "Get a project"),
    ("PUT", "/api/projects/{id}", true, "Update a project"),
    ("DELETE", "/api/projects/{id}", true, "Delete a project and its tasks"),
    ("GET", "/api/projects/{id}/tasks", true, "List tasks of a project, optional ?status="),
    ("POST", "/api/projects/{id}/tasks", true, "Create a task in a project"),
    ("GET", "/api/tasks/{id}", true, "Get a task"),
    ("PUT", "/api/tasks/{id}", true, "Update a task"),
    ("DELETE", "/api/tasks/{id}", true, "Delete a task"),
];

pub async fn docs() -> impl Responder {
    HttpResponse::Ok().json(DocsResponse {
        title: APP_TITLE,
        description: APP_DESCRIPTION,
        version: APP_VERSION,
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, auth, summary)| Endpoint { method, path, auth, summary })
            .collect(),
    })
}
