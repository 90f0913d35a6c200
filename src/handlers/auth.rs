//! 认证相关的 HTTP 处理器

use crate::{
    auth::identity::Identity, error::AppError, middleware::AppState, models::credential::*,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.register(req).await?;

    Ok(Json(response))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}

/// 获取当前调用者的令牌声明
pub async fn me(identity: Identity) -> Result<impl IntoResponse, AppError> {
    Ok(Json(json!({
        "sub": identity.email,
        "role": identity.role,
        "ref_id": identity.ref_id,
    })))
}
