use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use sqlx::SqlitePool;
use crate::auth::jwt::create_token;
use crate::auth::password::{dummy_verify, hash_password_blocking, verify_password};
use crate::config::Config;
use crate::database::DbSession;
use crate::errors::ApiError;
use crate::models::user::User;
use crate::routes::validation;
use super::auth_models::{LoginRequest, LoginResponse, RegisterRequest};

// register user to DB
pub async fn register(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let RegisterRequest { username, email, password } = req.into_inner();
    let username = validation::username(&username)?;
    let email = validation::email(&email)?;
    validation::password(&password)?;
    info!("Received request to register user: {}", username);

    // hash before taking a connection so the pool is not held during bcrypt
    let password_hash = hash_password_blocking(password, config.bcrypt_cost).await?;

    let mut db = DbSession::acquire(&pool).await?;
    let (taken,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM users WHERE username = ? OR email = ?",
    )
    .bind(&username)
    .bind(&email)
    .fetch_one(&mut *db)
    .await?;

    if taken > 0 {
        info!("Username or email already registered: {}", username);
        return Err(ApiError::Conflict {
            message: "Username or email already registered".to_string(),
        });
    }

    let user: User = sqlx::query_as(
        "INSERT INTO users (username, email, password_hash, is_active, created_at)
         VALUES (?, ?, ?, 1, ?)
         RETURNING id, username, email, password_hash, is_active, created_at",
    )
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(Utc::now())
    .fetch_one(&mut *db)
    .await?;

    info!("User {} registered successfully", user.username);
    Ok(HttpResponse::Created().json(user))
}

// login logic
pub async fn login(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let LoginRequest { username, password } = req.into_inner();
    let username = username.trim().to_string();
    info!("Received login request for user: {}", username);

    let mut db = DbSession::acquire(&pool).await?;
    let user: Option<User> = sqlx::query_as(
        "SELECT id, username, email, password_hash, is_active, created_at
         FROM users WHERE username = ?",
    )
    .bind(&username)
    .fetch_optional(&mut *db)
    .await?;
    // give the connection back before bcrypt runs
    drop(db);

    // unknown users still pay for one verification
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let cost = config.bcrypt_cost;
    let valid = web::block(move || match stored_hash {
        Some(stored_hash) => verify_password(&password, &stored_hash),
        None => dummy_verify(&password, cost),
    })
    .await
    .map_err(|e| ApiError::Internal { operation: format!("verify password: {}", e) })?;

    let user = match user {
        Some(user) if valid => user,
        Some(_) => {
            info!("Invalid password for user: {}", username);
            return Err(ApiError::unauthenticated("Invalid username or password"));
        }
        None => {
            info!("Invalid username: {}", username);
            return Err(ApiError::unauthenticated("Invalid username or password"));
        }
    };

    if !user.is_active {
        info!("Inactive user attempted to log in: {}", username);
        return Err(ApiError::unauthenticated("Inactive user"));
    }

    let issued = create_token(&user, &config)?;
    info!("User {} logged in successfully", username);
    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: issued.token,
        token_type: "bearer",
        expires_in: issued.expires_in,
    }))
}
