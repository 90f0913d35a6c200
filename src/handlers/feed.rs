//! 聚合信息流处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::school::collections,
    repository::DocumentRepository,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// 公共信息流：公告、通知与活动的合并视图
pub async fn feed(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());

    let announcements = repo.list(collections::ANNOUNCEMENT, None).await?;
    let circulars = repo.list(collections::CIRCULAR, None).await?;
    let events = repo.list(collections::EVENT, None).await?;

    Ok(Json(json!({
        "announcements": announcements,
        "circulars": circulars,
        "events": events,
    })))
}
