#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use common::{bearer, TestContext};

#[actix_web::test]
async fn me_returns_the_token_owner() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = register_and_login!(app, "ada");

    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "ada");
    assert_eq!(body["email"], "ada@example.com");
}

#[actix_web::test]
async fn password_change_takes_effect_on_next_login() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = register_and_login!(app, "ada");

    let req = test::TestRequest::put()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .set_json(json!({ "password": "a-brand-new-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "ada", "password": common::PASSWORD }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "ada", "password": "a-brand-new-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn taking_another_users_email_is_a_conflict() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    register_and_login!(app, "grace");
    let token = register_and_login!(app, "ada");

    let req = test::TestRequest::put()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .set_json(json!({ "email": "grace@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn deleting_user_removes_projects_and_tasks() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = register_and_login!(app, "ada");
    let other = register_and_login!(app, "grace");

    let project_id = create_project!(app, token, "Garden");
    create_task!(app, token, project_id, json!({ "title": "Dig" }));
    create_task!(app, token, project_id, json!({ "title": "Plant" }));
    let kept = create_project!(app, other, "Compiler");
    create_task!(app, other, kept, json!({ "title": "Parse" }));

    let req = test::TestRequest::delete()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(ctx.count("SELECT COUNT(*) FROM users").await, 1);
    assert_eq!(ctx.count("SELECT COUNT(*) FROM projects").await, 1);
    assert_eq!(ctx.count("SELECT COUNT(*) FROM tasks").await, 1);

    // the token still verifies but its user is gone
    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
