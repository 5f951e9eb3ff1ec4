use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use crate::models::task::TaskStatus;

// Absent fields keep their current value
#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    /// None = no change, Some(None) = clear, Some(text) = set
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    /// None = no change, Some(None) = clear, Some(date) = set
    #[serde(default, with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

#[derive(Serialize)]
pub struct DeleteTaskResponse {
    pub success: bool,
    pub message: String,
}
