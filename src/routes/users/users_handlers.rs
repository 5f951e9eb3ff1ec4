use actix_web::{web, HttpResponse};
use log::info;
use sqlx::SqlitePool;
use crate::auth::password::hash_password_blocking;
use crate::auth::AuthenticatedUser;
use crate::config::Config;
use crate::database::DbSession;
use crate::errors::ApiError;
use crate::models::user::User;
use crate::routes::validation;
use super::users_models::{DeleteUserResponse, UpdateUserRequest};

async fn fetch_user(db: &mut DbSession, user_id: i64) -> Result<User, ApiError> {
    sqlx::query_as(
        "SELECT id, username, email, password_hash, is_active, created_at
         FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(&mut **db)
    .await?
    .ok_or(ApiError::NotFound { resource: "User", id: user_id })
}

pub async fn get_me(
    current: AuthenticatedUser,
    mut db: DbSession,
) -> Result<HttpResponse, ApiError> {
    let user = fetch_user(&mut db, current.id).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_me(
    current: AuthenticatedUser,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    req: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let UpdateUserRequest { email, password } = req.into_inner();
    let email = email.map(|email| validation::email(&email)).transpose()?;

    // hash before taking a connection so the pool is not held during bcrypt
    let new_hash = match password {
        Some(password) => {
            validation::password(&password)?;
            Some(hash_password_blocking(password, config.bcrypt_cost).await?)
        }
        None => None,
    };

    let mut db = DbSession::acquire(&pool).await?;
    let user = fetch_user(&mut db, current.id).await?;
    let email = email.unwrap_or(user.email);
    let password_hash = new_hash.unwrap_or(user.password_hash);

    let updated: User = sqlx::query_as(
        "UPDATE users SET email = ?, password_hash = ? WHERE id = ?
         RETURNING id, username, email, password_hash, is_active, created_at",
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(current.id)
    .fetch_one(&mut *db)
    .await?;

    info!("User {} updated their account", current.username);
    Ok(HttpResponse::Ok().json(updated))
}

// Removes the account; projects and their tasks go with it
pub async fn delete_me(
    current: AuthenticatedUser,
    mut db: DbSession,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(current.id)
        .execute(&mut *db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound { resource: "User", id: current.id });
    }

    info!("User {} deleted their account", current.username);
    Ok(HttpResponse::Ok().json(DeleteUserResponse {
        success: true,
        message: "User deleted successfully".to_string(),
    }))
}
