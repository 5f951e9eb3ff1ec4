use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A project owned by exactly one user. Deleting it deletes its tasks.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
