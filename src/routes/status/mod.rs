pub mod status_handlers;
pub mod status_models;
