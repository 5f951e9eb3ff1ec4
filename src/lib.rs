pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
