//! 记录 CRUD API 集成测试
//!
//! 需要 PostgreSQL（TEST_DATABASE_URL），因此标记为 ignored：
//! cargo test -- --ignored

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{
    create_test_app_state, create_test_config, get_request, post_json, register_and_login,
    response_json, setup_test_db,
};

#[tokio::test]
#[ignore] // 需要数据库
async fn test_admin_teacher_create_and_list() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = school_system::routes::create_router(state);

    let token = register_and_login(&app, "adm@x.com", "pw1", "admin", None).await;

    let body = json!({
        "name": "Grace Hopper",
        "email": "grace@x.com",
        "department": "CS",
    });
    let response = post_json(app.clone(), "/admin/teachers", body, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let created = response_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = get_request(app, "/admin/teachers", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let docs = response_json(response).await;
    let docs = docs.as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["id"], id);
    assert_eq!(docs[0]["name"], "Grace Hopper");
    // 写入时间由存储层盖章
    assert!(docs[0]["created_at"].is_string());
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_student_list_filters() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = school_system::routes::create_router(state);

    let token = register_and_login(&app, "t@x.com", "pw1", "teacher", None).await;

    for (name, department, year) in [("Ada", "CS", 2), ("Alan", "CS", 3), ("Emmy", "Math", 2)] {
        let body = json!({
            "name": name,
            "email": format!("{}@x.com", name.to_lowercase()),
            "roll_number": name,
            "department": department,
            "year": year,
        });
        let response = post_json(app.clone(), "/teachers/students", body, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_request(
        app.clone(),
        "/teachers/students?department=CS&year=2",
        Some(&token),
    )
    .await;
    let docs = response_json(response).await;
    let docs = docs.as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["name"], "Ada");

    // 无过滤返回全量
    let response = get_request(app, "/teachers/students", Some(&token)).await;
    let docs = response_json(response).await;
    assert_eq!(docs.as_array().unwrap().len(), 3);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_student_year_out_of_range_rejected() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = school_system::routes::create_router(state);

    let token = register_and_login(&app, "t@x.com", "pw1", "teacher", None).await;

    let body = json!({
        "name": "Nine",
        "email": "nine@x.com",
        "roll_number": "N-9",
        "year": 9,
    });
    let response = post_json(app, "/teachers/students", body, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_attendance_mark_and_approve_flow() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = school_system::routes::create_router(state);

    let student_token = register_and_login(&app, "s@x.com", "pw1", "student", Some("s-1")).await;
    let teacher_token = register_and_login(&app, "t@x.com", "pw1", "teacher", Some("t-1")).await;

    // 学生打卡，记录落库时未审批
    let body = json!({
        "class_id": "c-1",
        "student_id": "s-1",
        "date": "2024-06-01",
        "marked_by": "s-1",
    });
    let response = post_json(
        app.clone(),
        "/students/attendance",
        body,
        Some(&student_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let created = response_json(response).await;
    assert_eq!(created["approved"], false);
    let record_id = created["id"].as_str().unwrap().to_string();

    // 教师审批
    let body = json!({"record_id": record_id, "approved_by": "t-1"});
    let response = post_json(
        app.clone(),
        "/teachers/attendance/approve",
        body,
        Some(&teacher_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let approved = response_json(response).await;
    assert_eq!(approved["status"], "approved");
    assert_eq!(approved["updated"], 1);

    // 不存在的记录：404
    let body = json!({
        "record_id": uuid::Uuid::new_v4().to_string(),
        "approved_by": "t-1",
    });
    let response = post_json(
        app.clone(),
        "/teachers/attendance/approve",
        body,
        Some(&teacher_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // 非法 id：400
    let body = json!({"record_id": "not-a-uuid", "approved_by": "t-1"});
    let response = post_json(
        app,
        "/teachers/attendance/approve",
        body,
        Some(&teacher_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_announcements_pinned_first() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = school_system::routes::create_router(state);

    let token = register_and_login(&app, "adm@x.com", "pw1", "admin", None).await;

    for (title, pinned) in [("first", false), ("pinned", true), ("second", false)] {
        let body = json!({"title": title, "body": "...", "pinned": pinned});
        let response = post_json(app.clone(), "/admin/announcements", body, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_request(app, "/admin/announcements", Some(&token)).await;
    let docs = response_json(response).await;
    let titles: Vec<&str> = docs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();

    // 置顶在前，其余按创建时间倒序
    assert_eq!(titles, vec!["pinned", "second", "first"]);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_feed_aggregates_collections() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = school_system::routes::create_router(state);

    let token = register_and_login(&app, "adm@x.com", "pw1", "admin", None).await;

    let body = json!({"title": "Ann", "body": "..."});
    post_json(app.clone(), "/admin/announcements", body, Some(&token)).await;

    let body = json!({"title": "Cir", "body": "..."});
    post_json(app.clone(), "/admin/circulars", body, Some(&token)).await;

    let body = json!({
        "title": "Ev",
        "starts_at": "2026-09-01T09:00:00Z",
        "ends_at": "2026-09-01T11:00:00Z",
    });
    post_json(app.clone(), "/admin/events", body, Some(&token)).await;

    // 信息流对匿名开放
    let response = get_request(app, "/feed", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let feed = response_json(response).await;
    assert_eq!(feed["announcements"].as_array().unwrap().len(), 1);
    assert_eq!(feed["circulars"].as_array().unwrap().len(), 1);
    assert_eq!(feed["events"].as_array().unwrap().len(), 1);
}
