// src/models/mod.rs

pub mod user;
pub mod project;
pub mod task;
