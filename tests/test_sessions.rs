#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;
use common::{bearer, TestContext};

// One connection in the pool: any session a request fails to give back
// makes the next request time out with 503.
async fn single_connection_context() -> TestContext {
    TestContext::with_vars(&[("DB_MAX_CONNECTIONS", "1"), ("DB_ACQUIRE_TIMEOUT_SECS", "2")]).await
}

#[actix_web::test]
async fn session_is_released_after_handler_errors() {
    let ctx = single_connection_context().await;
    let app = init_app!(ctx);
    let token = register_and_login!(app, "ada");

    for _ in 0..3 {
        let req = test::TestRequest::get()
            .uri("/api/projects/999")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "", "description": "invalid" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    let req = test::TestRequest::post()
        .uri("/api/projects")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Still works", "description": "after failures" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn session_is_released_after_database_errors() {
    let ctx = single_connection_context().await;
    let app = init_app!(ctx);
    register_and_login!(app, "grace");
    let token = register_and_login!(app, "ada");

    // unique violation raised by the database itself
    for _ in 0..3 {
        let req = test::TestRequest::put()
            .uri("/api/users/me")
            .insert_header(bearer(&token))
            .set_json(json!({ "email": "grace@example.com" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }

    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn rolled_back_delete_releases_session() {
    let ctx = single_connection_context().await;
    let app = init_app!(ctx);
    let ada = register_and_login!(app, "ada");
    let grace = register_and_login!(app, "grace");
    let project_id = create_project!(app, ada, "Kept");

    // fails inside the transaction, which is dropped without commit
    let req = test::TestRequest::delete()
        .uri(&format!("/api/projects/{}", project_id))
        .insert_header(bearer(&grace))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/projects/{}", project_id))
        .insert_header(bearer(&ada))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn password_handlers_leave_the_connection_free() {
    let ctx = single_connection_context().await;
    let app = init_app!(ctx);
    let token = register_and_login!(app, "ada");

    for (username, password) in [("ada", "wrong-password"), ("nobody", "whatever-password")] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    let req = test::TestRequest::put()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .set_json(json!({ "password": "a-new-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // duplicate registration hashes first, then fails on the database check
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": "ada", "email": "ada2@example.com", "password": "password123" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "ada", "password": "a-new-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
