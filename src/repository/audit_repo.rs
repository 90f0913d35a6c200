//! Audit repository (审计数据访问)

use crate::{error::AppError, models::audit::*};
use sqlx::{PgPool, Row};

pub struct AuditRepository {
    db: PgPool,
}

impl AuditRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 插入审计条目
    pub async fn insert_entry(&self, entry: &AuditEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_entries (
                id, ref_id, role, action, path, method, status, client_ip, occurred_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.ref_id)
        .bind(&entry.role)
        .bind(&entry.action)
        .bind(&entry.path)
        .bind(&entry.method)
        .bind(entry.status)
        .bind(&entry.client_ip)
        .bind(entry.occurred_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// 查询审计条目
    pub async fn query_entries(
        &self,
        filters: &AuditEntryFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditEntry>, AppError> {
        let mut query = String::from("SELECT * FROM audit_entries WHERE 1=1");
        let mut index = 0;

        if filters.role.is_some() {
            index += 1;
            query.push_str(&format!(" AND role = ${}", index));
        }
        if filters.path.is_some() {
            index += 1;
            query.push_str(&format!(" AND path = ${}", index));
        }
        if filters.method.is_some() {
            index += 1;
            query.push_str(&format!(" AND method = ${}", index));
        }
        if filters.status.is_some() {
            index += 1;
            query.push_str(&format!(" AND status = ${}", index));
        }
        if filters.start_time.is_some() {
            index += 1;
            query.push_str(&format!(" AND occurred_at >= ${}", index));
        }
        if filters.end_time.is_some() {
            index += 1;
            query.push_str(&format!(" AND occurred_at <= ${}", index));
        }

        query.push_str(&format!(
            " ORDER BY occurred_at DESC LIMIT ${} OFFSET ${}",
            index + 1,
            index + 2
        ));

        let mut query_builder = sqlx::query_as::<_, AuditEntry>(&query);

        if let Some(role) = &filters.role {
            query_builder = query_builder.bind(role);
        }
        if let Some(path) = &filters.path {
            query_builder = query_builder.bind(path);
        }
        if let Some(method) = &filters.method {
            query_builder = query_builder.bind(method);
        }
        if let Some(status) = filters.status {
            query_builder = query_builder.bind(status);
        }
        if let Some(start_time) = filters.start_time {
            query_builder = query_builder.bind(start_time);
        }
        if let Some(end_time) = filters.end_time {
            query_builder = query_builder.bind(end_time);
        }

        let entries = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(entries)
    }

    /// 统计审计条目数量
    pub async fn count_entries(&self, filters: &AuditEntryFilters) -> Result<i64, AppError> {
        let mut query = String::from("SELECT COUNT(*) FROM audit_entries WHERE 1=1");
        let mut index = 0;

        if filters.role.is_some() {
            index += 1;
            query.push_str(&format!(" AND role = ${}", index));
        }
        if filters.path.is_some() {
            index += 1;
            query.push_str(&format!(" AND path = ${}", index));
        }
        if filters.method.is_some() {
            index += 1;
            query.push_str(&format!(" AND method = ${}", index));
        }
        if filters.status.is_some() {
            index += 1;
            query.push_str(&format!(" AND status = ${}", index));
        }
        if filters.start_time.is_some() {
            index += 1;
            query.push_str(&format!(" AND occurred_at >= ${}", index));
        }
        if filters.end_time.is_some() {
            index += 1;
            query.push_str(&format!(" AND occurred_at <= ${}", index));
        }

        let mut query_builder = sqlx::query(&query);

        if let Some(role) = &filters.role {
            query_builder = query_builder.bind(role);
        }
        if let Some(path) = &filters.path {
            query_builder = query_builder.bind(path);
        }
        if let Some(method) = &filters.method {
            query_builder = query_builder.bind(method);
        }
        if let Some(status) = filters.status {
            query_builder = query_builder.bind(status);
        }
        if let Some(start_time) = filters.start_time {
            query_builder = query_builder.bind(start_time);
        }
        if let Some(end_time) = filters.end_time {
            query_builder = query_builder.bind(end_time);
        }

        let count: i64 = query_builder.fetch_one(&self.db).await?.get(0);
        Ok(count)
    }
}
