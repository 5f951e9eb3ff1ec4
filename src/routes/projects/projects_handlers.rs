use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use sqlx::{Connection, SqliteConnection};
use crate::auth::AuthenticatedUser;
use crate::database::DbSession;
use crate::errors::ApiError;
use crate::models::{project::Project, task::Task};
use crate::routes::validation;
use super::projects_models::{
    CreateProjectRequest, CreateTaskRequest, DeleteProjectResponse,
    TaskListQuery, UpdateProjectRequest,
};

/// Loads a project the caller owns. Other users' projects look exactly like missing ones.
pub async fn fetch_owned_project(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> Result<Project, ApiError> {
    sqlx::query_as(
        "SELECT id, title, description, user_id, created_at
         FROM projects WHERE id = ? AND user_id = ?",
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?
    .ok_or(ApiError::NotFound { resource: "Project", id: project_id })
}

pub async fn list_projects(
    current: AuthenticatedUser,
    mut db: DbSession,
) -> Result<HttpResponse, ApiError> {
    let projects: Vec<Project> = sqlx::query_as(
        "SELECT id, title, description, user_id, created_at
         FROM projects WHERE user_id = ?
         ORDER BY created_at DESC, id DESC",
    )
    .bind(current.id)
    .fetch_all(&mut *db)
    .await?;

    Ok(HttpResponse::Ok().json(projects))
}

pub async fn create_project(
    current: AuthenticatedUser,
    mut db: DbSession,
    req: web::Json<CreateProjectRequest>,
) -> Result<HttpResponse, ApiError> {
    let title = validation::title(&req.title)?;

    let project: Project = sqlx::query_as(
        "INSERT INTO projects (title, description, user_id, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING id, title, description, user_id, created_at",
    )
    .bind(&title)
    .bind(&req.description)
    .bind(current.id)
    .bind(Utc::now())
    .fetch_one(&mut *db)
    .await?;

    info!("User {} created project {}", current.username, project.id);
    Ok(HttpResponse::Created().json(project))
}

pub async fn get_project(
    current: AuthenticatedUser,
    mut db: DbSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let project = fetch_owned_project(&mut db, path.into_inner(), current.id).await?;
    Ok(HttpResponse::Ok().json(project))
}

pub async fn update_project(
    current: AuthenticatedUser,
    mut db: DbSession,
    path: web::Path<i64>,
    req: web::Json<UpdateProjectRequest>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();
    let existing = fetch_owned_project(&mut db, project_id, current.id).await?;
    let UpdateProjectRequest { title, description } = req.into_inner();

    let title = match title {
        Some(title) => validation::title(&title)?,
        None => existing.title,
    };
    let description = description.unwrap_or(existing.description);

    let project: Project = sqlx::query_as(
        "UPDATE projects SET title = ?, description = ? WHERE id = ?
         RETURNING id, title, description, user_id, created_at",
    )
    .bind(&title)
    .bind(&description)
    .bind(project_id)
    .fetch_one(&mut *db)
    .await?;

    info!("User {} updated project {}", current.username, project_id);
    Ok(HttpResponse::Ok().json(project))
}

// Handler to delete a project together with every task in it
pub async fn delete_project(
    current: AuthenticatedUser,
    mut db: DbSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();
    let mut tx = db.begin().await?;

    fetch_owned_project(&mut tx, project_id, current.id).await?;

    let (task_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = ?")
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await?;

    // tasks are removed by ON DELETE CASCADE
    sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "User {} deleted project {} with {} task(s)",
        current.username, project_id, task_count
    );
    Ok(HttpResponse::Ok().json(DeleteProjectResponse {
        success: true,
        message: "Project deleted successfully".to_string(),
        deleted_tasks: task_count,
    }))
}

pub async fn list_project_tasks(
    current: AuthenticatedUser,
    mut db: DbSession,
    path: web::Path<i64>,
    query: web::Query<TaskListQuery>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();
    fetch_owned_project(&mut db, project_id, current.id).await?;

    let tasks: Vec<Task> = sqlx::query_as(
        "SELECT id, title, description, status, due_date, project_id, created_at, updated_at
         FROM tasks
         WHERE project_id = ?1 AND (?2 IS NULL OR status = ?2)
         ORDER BY created_at, id",
    )
    .bind(project_id)
    .bind(query.status)
    .fetch_all(&mut *db)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn create_project_task(
    current: AuthenticatedUser,
    mut db: DbSession,
    path: web::Path<i64>,
    req: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();
    fetch_owned_project(&mut db, project_id, current.id).await?;
    let title = validation::title(&req.title)?;
    let now = Utc::now();

    let task: Task = sqlx::query_as(
        "INSERT INTO tasks (title, description, status, due_date, project_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING id, title, description, status, due_date, project_id, created_at, updated_at",
    )
    .bind(&title)
    .bind(&req.description)
    .bind(req.status)
    .bind(req.due_date)
    .bind(project_id)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *db)
    .await?;

    info!("User {} added task {} to project {}", current.username, task.id, project_id);
    Ok(HttpResponse::Created().json(task))
}
