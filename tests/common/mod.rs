#![allow(dead_code, unused_macros)]

use std::collections::HashMap;
use sqlx::SqlitePool;
use tempfile::TempDir;
use task_manager_backend::config::Config;
use task_manager_backend::database::{create_pool, create_tables};

pub const PASSWORD: &str = "password123";

/// A fresh database file in a temporary directory, schema already created.
pub struct TestContext {
    pub dir: TempDir,
    pub config: Config,
    pub pool: SqlitePool,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_vars(&[]).await
    }

    pub async fn with_vars(extra: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert(
            "DATABASE_URL".to_string(),
            format!("sqlite://{}", dir.path().join("test.db").display()),
        );
        vars.insert(
            "STATIC_DIR".to_string(),
            dir.path().join("static").display().to_string(),
        );
        vars.insert("JWT_SECRET".to_string(), "integration-test-secret".to_string());
        vars.insert("BCRYPT_COST".to_string(), "4".to_string());
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }

        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let pool = create_pool(&config).await.unwrap();
        create_tables(&pool).await.unwrap();

        TestContext { dir, config, pool }
    }

    pub async fn count(&self, sql: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(sql).fetch_one(&self.pool).await.unwrap();
        count
    }
}

/// Builds the application the same way `main` does, minus the access logger.
macro_rules! init_app {
    ($ctx:expr) => {
        ::actix_web::test::init_service(
            ::actix_web::App::new()
                .wrap(::task_manager_backend::middleware::build_cors(&$ctx.config.cors_origins))
                .app_data(::actix_web::web::Data::new($ctx.pool.clone()))
                .app_data(::actix_web::web::Data::new($ctx.config.clone()))
                .configure(::task_manager_backend::routes::routes::api_configure)
                .configure(::task_manager_backend::routes::routes::static_configure(
                    &$ctx.config.static_dir,
                )),
        )
        .await
    };
}

/// Registers `username` and returns a bearer token for it.
macro_rules! register_and_login {
    ($app:expr, $username:expr) => {{
        let username: &str = $username;
        let req = ::actix_web::test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(::serde_json::json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": crate::common::PASSWORD,
            }))
            .to_request();
        let resp = ::actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), ::actix_web::http::StatusCode::CREATED);

        let req = ::actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(::serde_json::json!({
                "username": username,
                "password": crate::common::PASSWORD,
            }))
            .to_request();
        let body: ::serde_json::Value = ::actix_web::test::call_and_read_body_json(&$app, req).await;
        body["access_token"].as_str().unwrap().to_string()
    }};
}

/// Creates a project as the token's owner and returns its id.
macro_rules! create_project {
    ($app:expr, $token:expr, $title:expr) => {{
        let req = ::actix_web::test::TestRequest::post()
            .uri("/api/projects")
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json(::serde_json::json!({ "title": $title, "description": "test project" }))
            .to_request();
        let resp = ::actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), ::actix_web::http::StatusCode::CREATED);
        let body: ::serde_json::Value = ::actix_web::test::read_body_json(resp).await;
        body["id"].as_i64().unwrap()
    }};
}

/// Creates a task in a project and returns its id.
macro_rules! create_task {
    ($app:expr, $token:expr, $project_id:expr, $body:expr) => {{
        let req = ::actix_web::test::TestRequest::post()
            .uri(&format!("/api/projects/{}/tasks", $project_id))
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json($body)
            .to_request();
        let resp = ::actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), ::actix_web::http::StatusCode::CREATED);
        let body: ::serde_json::Value = ::actix_web::test::read_body_json(resp).await;
        body["id"].as_i64().unwrap()
    }};
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
