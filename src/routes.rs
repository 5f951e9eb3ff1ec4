pub mod routes;
pub mod validation;
pub mod status;
pub mod auth;
pub mod users;
pub mod projects;
pub mod tasks;
