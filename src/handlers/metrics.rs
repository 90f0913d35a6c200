//! 指标处理器
//! 提供 /metrics 端点

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{db, middleware::AppState};

/// 指标响应
#[derive(Serialize)]
pub struct MetricsResponse {
    pub db_pool_size: u32,
    pub db_pool_idle: u32,
    pub process_uptime_secs: u64,
}

/// 指标暴露端点
pub async fn metrics_export(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    // 请求计数与时延直方图通过 metrics crate 记录，
    // 此端点暴露进程与连接池的基础状态
    db::record_pool_metrics(&state.db);

    Json(MetricsResponse {
        db_pool_size: state.db.size(),
        db_pool_idle: state.db.num_idle() as u32,
        process_uptime_secs: crate::handlers::health::get_uptime(),
    })
}
