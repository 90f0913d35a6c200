//! 审计日志服务

use crate::{
    auth::identity::Identity,
    error::AppError,
    models::audit::*,
    repository::audit_repo::AuditRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

/// 每个请求记录的动作标签
pub const ACTION_REQUEST: &str = "request";

pub struct AuditService {
    db: PgPool,
}

impl AuditService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 记录一次已完成请求
    ///
    /// Best-effort 契约：持久化失败只记日志，绝不影响请求结果。
    pub async fn record_request(
        &self,
        identity: Option<&Identity>,
        path: &str,
        method: &str,
        status: u16,
        client_ip: &str,
    ) {
        let entry = AuditEntry {
            id: Uuid::new_v4(),
            ref_id: identity.and_then(|i| i.ref_id.clone()),
            role: identity.map(|i| i.role.clone()),
            action: ACTION_REQUEST.to_string(),
            path: path.to_string(),
            method: method.to_string(),
            status: status as i32,
            client_ip: client_ip.to_string(),
            occurred_at: chrono::Utc::now(),
        };

        let repo = AuditRepository::new(self.db.clone());
        if let Err(e) = repo.insert_entry(&entry).await {
            tracing::warn!(
                path = %entry.path,
                error = %e,
                "Failed to persist audit entry"
            );
        }
    }

    /// 查询审计条目
    pub async fn query_entries(
        &self,
        filters: &AuditEntryFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditEntry>, AppError> {
        let repo = AuditRepository::new(self.db.clone());
        repo.query_entries(filters, limit, offset).await
    }

    /// 查询审计条目数量
    pub async fn count_entries(&self, filters: &AuditEntryFilters) -> Result<i64, AppError> {
        let repo = AuditRepository::new(self.db.clone());
        repo.count_entries(filters).await
    }
}
