//! 审计中间件集成测试
//!
//! 需要 PostgreSQL（TEST_DATABASE_URL），因此标记为 ignored：
//! cargo test -- --ignored

use axum::http::StatusCode;
use school_system::models::audit::AuditEntry;
use serde_json::json;
use sqlx::PgPool;

mod common;
use common::{
    create_test_app_state, create_test_config, get_request, post_json, register_and_login,
    response_json, setup_test_db,
};

async fn entries_for_path(pool: &PgPool, path: &str) -> Vec<AuditEntry> {
    sqlx::query_as::<_, AuditEntry>(
        "SELECT * FROM audit_entries WHERE path = $1 ORDER BY occurred_at ASC",
    )
    .bind(path)
    .fetch_all(pool)
    .await
    .expect("Failed to query audit entries")
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_every_request_produces_one_entry_with_actual_status() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool.clone()).await;
    let app = school_system::routes::create_router(state);

    // 成功请求
    let response = get_request(app.clone(), "/feed", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let entries = entries_for_path(&pool, "/feed").await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, 200);
    assert_eq!(entries[0].action, "request");
    assert_eq!(entries[0].method, "GET");
    assert!(entries[0].role.is_none());

    // 被门卫拒绝的请求同样留档，状态为实际的 401
    let response = get_request(app.clone(), "/admin/teachers", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let entries = entries_for_path(&pool, "/admin/teachers").await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, 401);

    // 未匹配路由也会经过审计层
    let response = get_request(app, "/no/such/route", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let entries = entries_for_path(&pool, "/no/such/route").await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, 404);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_authenticated_requests_carry_actor_fields() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool.clone()).await;
    let app = school_system::routes::create_router(state);

    let token = register_and_login(&app, "t@x.com", "pw1", "teacher", Some("t-42")).await;

    let response = get_request(app, "/teachers/students", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let entries = entries_for_path(&pool, "/teachers/students").await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].role.as_deref(), Some("teacher"));
    assert_eq!(entries[0].ref_id.as_deref(), Some("t-42"));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_audit_listing_is_admin_gated() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = school_system::routes::create_router(state);

    let student_token = register_and_login(&app, "s@x.com", "pw1", "student", None).await;
    let admin_token = register_and_login(&app, "adm@x.com", "pw1", "admin", None).await;

    let response = get_request(app.clone(), "/audit/entries", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_request(app.clone(), "/audit/entries", Some(&student_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_request(app.clone(), "/audit/entries", Some(&admin_token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["entries"].is_array());
    // 此前的注册/登录/被拒请求都已留档
    assert!(body["count"].as_i64().unwrap() > 0);

    // 状态过滤
    let response = get_request(
        app,
        "/audit/entries?status=403&limit=10",
        Some(&admin_token),
    )
    .await;
    let body = response_json(response).await;
    for entry in body["entries"].as_array().unwrap() {
        assert_eq!(entry["status"], 403);
    }
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_audit_write_failure_does_not_affect_response() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool.clone()).await;
    let app = school_system::routes::create_router(state);

    // 砍掉审计表，写入必然失败
    sqlx::query("DROP TABLE audit_entries")
        .execute(&pool)
        .await
        .expect("Failed to drop audit table");

    // 请求结果不受审计失败影响
    let response = get_request(app.clone(), "/feed", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/auth/register",
        json!({"email": "a@x.com", "password": "pw1", "role": "teacher"}),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["id"].is_string());
}
