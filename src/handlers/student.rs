//! 学生端的 HTTP 处理器
//! 考勤打卡与资料/作业查询

use crate::{
    error::AppError,
    handlers::to_document,
    middleware::AppState,
    models::school::{collections, AttendanceRecord},
    repository::DocumentRepository,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 学生侧查询必须带班级
#[derive(Debug, Deserialize)]
pub struct RequiredClassQuery {
    pub class_id: String,
}

/// 学生打卡
/// 新记录始终以未审批状态写入
pub async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<AttendanceRecord>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // 审批状态由教师端流程翻转，打卡时强制复位
    payload.approved = false;
    payload.approved_by = None;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::ATTENDANCE_RECORD, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id, "approved": false})))
}

/// 查询本班学习资料
pub async fn student_materials(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RequiredClassQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let filter = json!({"class_id": query.class_id});
    let docs = repo
        .list(collections::STUDY_MATERIAL, Some(&filter))
        .await?;

    Ok(Json(docs))
}

/// 查询本班作业
pub async fn student_assignments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RequiredClassQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let filter = json!({"class_id": query.class_id});
    let docs = repo.list(collections::ASSIGNMENT, Some(&filter)).await?;

    Ok(Json(docs))
}
