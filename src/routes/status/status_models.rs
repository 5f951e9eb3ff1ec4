use serde::Serialize;

pub const APP_TITLE: &str = "Task Manager API";
pub const APP_DESCRIPTION: &str = "Task and project management system with JWT authentication";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: &'static str,
    pub docs: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub auth: bool,
    pub summary: &'static str,
}

#[derive(Serialize)]
pub struct DocsResponse {
    pub title: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<Endpoint>,
}
