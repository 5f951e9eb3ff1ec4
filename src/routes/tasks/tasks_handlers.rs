use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use sqlx::SqliteConnection;
use crate::auth::AuthenticatedUser;
use crate::database::DbSession;
use crate::errors::ApiError;
use crate::models::task::Task;
use crate::routes::validation;
use super::tasks_models::{DeleteTaskResponse, UpdateTaskRequest};

// A task is visible only through a project the caller owns
async fn fetch_owned_task(
    conn: &mut SqliteConnection,
    task_id: i64,
    user_id: i64,
) -> Result<Task, ApiError> {
    sqlx::query_as(
        "SELECT t.id, t.title, t.description, t.status, t.due_date, t.project_id, t.created_at, t.updated_at
         FROM tasks t
         JOIN projects p ON p.id = t.project_id
         WHERE t.id = ? AND p.user_id = ?",
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?
    .ok_or(ApiError::NotFound { resource: "Task", id: task_id })
}

pub async fn get_task(
    current: AuthenticatedUser,
    mut db: DbSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let task = fetch_owned_task(&mut db, path.into_inner(), current.id).await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn update_task(
    current: AuthenticatedUser,
    mut db: DbSession,
    path: web::Path<i64>,
    req: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let task_id = path.into_inner();
    let existing = fetch_owned_task(&mut db, task_id, current.id).await?;
    let UpdateTaskRequest { title, description, status, due_date } = req.into_inner();

    let title = match title {
        Some(title) => validation::title(&title)?,
        None => existing.title,
    };
    let description = description.unwrap_or(existing.description);
    let status = status.unwrap_or(existing.status);
    let due_date = due_date.unwrap_or(existing.due_date);

    let task: Task = sqlx::query_as(
        "UPDATE tasks SET title = ?, description = ?, status = ?, due_date = ?, updated_at = ?
         WHERE id = ?
         RETURNING id, title, description, status, due_date, project_id, created_at, updated_at",
    )
    .bind(&title)
    .bind(&description)
    .bind(status)
    .bind(due_date)
    .bind(Utc::now())
    .bind(task_id)
    .fetch_one(&mut *db)
    .await?;

    info!("User {} updated task {} (status: {})", current.username, task_id, task.status);
    Ok(HttpResponse::Ok().json(task))
}

pub async fn delete_task(
    current: AuthenticatedUser,
    mut db: DbSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let task_id = path.into_inner();
    fetch_owned_task(&mut db, task_id, current.id).await?;

    sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(task_id)
        .execute(&mut *db)
        .await?;

    info!("User {} deleted task {}", current.username, task_id);
    Ok(HttpResponse::Ok().json(DeleteTaskResponse {
        success: true,
        message: "Task deleted successfully".to_string(),
    }))
}
