use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::task::TaskStatus;

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct DeleteProjectResponse {
    pub success: bool,
    pub message: String,
    pub deleted_tasks: i64,
}

#[derive(Deserialize)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
}

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
}
