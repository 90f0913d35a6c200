//! 管理端的 HTTP 处理器
//! 教师、公告、通知、活动与绩效评审的创建与列表

use crate::{
    error::AppError,
    handlers::{document_time, to_document},
    middleware::AppState,
    models::school::{collections, Announcement, Circular, Event, PerformanceReview, Teacher},
    repository::DocumentRepository,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

/// 新增教师
pub async fn add_teacher(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Teacher>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::TEACHER, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出教师
pub async fn list_teachers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let docs = repo.list(collections::TEACHER, None).await?;

    Ok(Json(docs))
}

/// 新增公告
pub async fn add_announcement(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Announcement>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::ANNOUNCEMENT, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出公告
/// 置顶在前，其余按创建时间倒序
pub async fn list_announcements(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let mut docs = repo.list(collections::ANNOUNCEMENT, None).await?;

    docs.sort_by(|a, b| {
        let a_pinned = a.get("pinned").and_then(Value::as_bool).unwrap_or(false);
        let b_pinned = b.get("pinned").and_then(Value::as_bool).unwrap_or(false);

        b_pinned.cmp(&a_pinned).then_with(|| {
            document_time(b, "created_at").cmp(&document_time(a, "created_at"))
        })
    });

    Ok(Json(docs))
}

/// 新增通知
pub async fn add_circular(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Circular>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::CIRCULAR, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出通知
pub async fn list_circulars(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let docs = repo.list(collections::CIRCULAR, None).await?;

    Ok(Json(docs))
}

/// 新增活动
pub async fn add_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Event>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::EVENT, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出活动
/// 即将开始的在前
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let mut docs = repo.list(collections::EVENT, None).await?;

    docs.sort_by(|a, b| document_time(a, "starts_at").cmp(&document_time(b, "starts_at")));

    Ok(Json(docs))
}

/// 新增绩效评审
pub async fn add_performance_review(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PerformanceReview>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::PERFORMANCE_REVIEW, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出绩效评审
pub async fn list_performance_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let docs = repo.list(collections::PERFORMANCE_REVIEW, None).await?;

    Ok(Json(docs))
}
