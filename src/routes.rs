//! 路由注册
//! 创建所有 API 路由并应用中间件
//!
//! 每条路由的角色要求在这里集中枚举，而不是散落在 handler 里：
//! 管理端仅 admin，教师端 teacher/admin，学生端任意已认证调用者，
//! 元信息、认证和公共信息流完全开放。

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{
    auth::identity::{role_gate_middleware, RoleGate},
    handlers,
    middleware::AppState,
};

/// 管理端允许的角色
const ADMIN_ROLES: &[&str] = &["admin"];
/// 教师端允许的角色
const TEACHER_ROLES: &[&str] = &["teacher", "admin"];

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin_gate = RoleGate::allow(ADMIN_ROLES);
    let teacher_gate = RoleGate::allow(TEACHER_ROLES);
    let authenticated_gate = RoleGate::authenticated();

    // 公开端点（无需解析身份）
    let open_routes = Router::new()
        .route("/", get(handlers::meta::read_root))
        .route("/schema", get(handlers::meta::get_schema))
        .route("/test", get(handlers::meta::test_database))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_export))
        .route("/feed", get(handlers::feed::feed))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    // 任意已认证调用者
    let authenticated_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .layer(from_fn_with_state(
            authenticated_gate,
            role_gate_middleware,
        ));

    // 管理端
    let admin_routes = Router::new()
        .route(
            "/admin/teachers",
            get(handlers::admin::list_teachers).post(handlers::admin::add_teacher),
        )
        .route(
            "/admin/announcements",
            get(handlers::admin::list_announcements).post(handlers::admin::add_announcement),
        )
        .route(
            "/admin/circulars",
            get(handlers::admin::list_circulars).post(handlers::admin::add_circular),
        )
        .route(
            "/admin/events",
            get(handlers::admin::list_events).post(handlers::admin::add_event),
        )
        .route(
            "/admin/performance",
            get(handlers::admin::list_performance_reviews)
                .post(handlers::admin::add_performance_review),
        )
        .layer(from_fn_with_state(admin_gate, role_gate_middleware));

    // 教师端
    let teacher_routes = Router::new()
        .route(
            "/teachers/students",
            get(handlers::teacher::list_students).post(handlers::teacher::add_student),
        )
        .route(
            "/teachers/classes",
            get(handlers::teacher::list_classrooms).post(handlers::teacher::add_classroom),
        )
        .route(
            "/teachers/materials",
            get(handlers::teacher::list_materials).post(handlers::teacher::add_material),
        )
        .route(
            "/teachers/assignments",
            get(handlers::teacher::list_assignments).post(handlers::teacher::add_assignment),
        )
        .route(
            "/teachers/attendance/approve",
            post(handlers::teacher::approve_attendance),
        )
        .layer(from_fn_with_state(teacher_gate, role_gate_middleware));

    // 学生端
    let student_routes = Router::new()
        .route(
            "/students/attendance",
            post(handlers::student::mark_attendance),
        )
        .route(
            "/students/materials",
            get(handlers::student::student_materials),
        )
        .route(
            "/students/assignments",
            get(handlers::student::student_assignments),
        )
        .layer(from_fn_with_state(
            authenticated_gate,
            role_gate_middleware,
        ));

    // 审计查询（仅管理员）
    let audit_routes = Router::new()
        .route("/audit/entries", get(handlers::audit::list_audit_entries))
        .layer(from_fn_with_state(admin_gate, role_gate_middleware));

    // 组合所有路由
    // 审计中间件包在角色门卫之外，门卫拒绝的请求同样会留下审计记录
    Router::new()
        .merge(open_routes)
        .merge(authenticated_routes)
        .merge(admin_routes)
        .merge(teacher_routes)
        .merge(student_routes)
        .merge(audit_routes)
        .layer(from_fn_with_state(
            state.clone(),
            crate::middleware::audit_middleware,
        ))
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
