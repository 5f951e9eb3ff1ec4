use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use log::{debug, info};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use crate::config::Config;
use crate::errors::ApiError;

const SCHEMA: &[&str] = &[
    "
    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      VARCHAR(50)  NOT NULL UNIQUE,
        email         VARCHAR(255) NOT NULL UNIQUE,
        password_hash TEXT         NOT NULL,
        is_active     BOOLEAN      NOT NULL DEFAULT 1,
        created_at    DATETIME     NOT NULL
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS projects (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       VARCHAR(200) NOT NULL CHECK (length(title) BETWEEN 1 AND 200),
        description TEXT         NOT NULL,
        user_id     INTEGER      NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at  DATETIME     NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_projects_user_id ON projects(user_id)",
    "
    CREATE TABLE IF NOT EXISTS tasks (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       VARCHAR(200) NOT NULL CHECK (length(title) BETWEEN 1 AND 200),
        description TEXT,
        status      TEXT         NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'in_progress', 'completed')),
        due_date    DATETIME,
        project_id  INTEGER      NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        created_at  DATETIME     NOT NULL,
        updated_at  DATETIME     NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_tasks_project_id ON tasks(project_id)",
];

/// Opens the pool for the configured database file, creating the file if needed.
/// Foreign keys are enforced on every connection so cascades fire.
pub async fn create_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
}

/// Creates every table and index that does not exist yet. Safe to run on each startup.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!("Database tables created/verified");
    Ok(())
}

/// A database connection scoped to one request.
///
/// Handlers take it as an extractor argument. The connection goes back to the pool
/// when the value is dropped, which happens once the handler finishes no matter
/// whether it returned `Ok`, returned `Err` or unwound.
pub struct DbSession {
    conn: PoolConnection<Sqlite>,
}

impl DbSession {
    pub async fn acquire(pool: &SqlitePool) -> Result<Self, ApiError> {
        let conn = pool.acquire().await.map_err(|e| match e {
            sqlx::Error::PoolTimedOut => ApiError::ServiceUnavailable,
            other => ApiError::Database(other),
        })?;
        debug!("Acquired database session");
        Ok(DbSession { conn })
    }
}

impl Deref for DbSession {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl Drop for DbSession {
    fn drop(&mut self) {
        debug!("Released database session");
    }
}

impl FromRequest for DbSession {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<SqlitePool>>().cloned();
        Box::pin(async move {
            let pool = pool.ok_or_else(|| ApiError::Internal {
                operation: "locate the database pool".to_string(),
            })?;
            DbSession::acquire(pool.get_ref()).await
        })
    }
}
