//! 审计查询处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::audit::AuditEntryFilters,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// 审计列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct AuditListQuery {
    pub role: Option<String>,
    pub path: Option<String>,
    pub method: Option<String>,
    pub status: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 列出审计条目（仅管理员）
pub async fn list_audit_entries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuditListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(50).clamp(1, 500);
    let offset = query.offset.unwrap_or(0).max(0);

    let filters = AuditEntryFilters {
        role: query.role,
        path: query.path,
        method: query.method,
        status: query.status,
        start_time: query.start_time,
        end_time: query.end_time,
    };

    let entries = state
        .audit_service
        .query_entries(&filters, limit, offset)
        .await?;
    let count = state.audit_service.count_entries(&filters).await?;

    Ok(Json(json!({
        "entries": entries,
        "count": count,
    })))
}
